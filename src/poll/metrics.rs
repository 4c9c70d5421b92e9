// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for poll-tick outcomes.
#[derive(Debug, Default)]
pub struct PollMetrics {
	ticks: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	relogins: AtomicU64,
}
impl PollMetrics {
	/// Returns the total number of ticks started.
	pub fn ticks(&self) -> u64 {
		self.ticks.load(Ordering::Relaxed)
	}

	/// Returns the number of ticks that ended with a fresh snapshot.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of ticks that degraded to stale or missing data.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns the number of full logins forced by a failed refresh.
	pub fn relogins(&self) -> u64 {
		self.relogins.load(Ordering::Relaxed)
	}

	pub(crate) fn record_tick(&self) {
		self.ticks.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_relogin(&self) {
		self.relogins.fetch_add(1, Ordering::Relaxed);
	}
}
