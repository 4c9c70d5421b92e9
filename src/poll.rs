//! Poll-tick orchestration for one configured device.
//!
//! The host scheduler calls [`Poller::tick`] on its timer; a tick runs its network
//! calls sequentially and an async guard keeps ticks from overlapping even if the
//! host misbehaves. Failures never surface as `Err`: each tick reports the last
//! good snapshot plus a staleness flag, so hosts keep showing data while the next
//! tick retries.

mod metrics;

pub use metrics::PollMetrics;

// self
use crate::{
	_prelude::*,
	client::OilFoxClient,
	device::DeviceState,
	error::ApiError,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	session::Session,
	usage::{UsageAccumulator, UsageTotals},
};

/// Result of one poll tick.
#[derive(Debug)]
pub struct PollOutcome {
	/// Last good snapshot, current or retained from an earlier tick.
	pub device: Option<DeviceState>,
	/// `true` when `device` was retained across a failure instead of refreshed.
	pub stale: bool,
	/// Consumption totals accumulated so far.
	pub usage: UsageTotals,
	/// Classified failure when the tick did not produce a fresh snapshot.
	pub failure: Option<Error>,
}
impl PollOutcome {
	/// Returns `true` when this tick produced a fresh snapshot.
	pub fn is_fresh(&self) -> bool {
		self.failure.is_none()
	}

	/// Returns `true` when the failure calls for reconfiguration rather than patience.
	pub fn needs_reauth(&self) -> bool {
		self.failure.as_ref().is_some_and(Error::is_auth)
	}
}

#[derive(Debug, Default)]
struct PollState {
	session: Option<Session>,
	device: Option<DeviceState>,
	usage: UsageAccumulator,
}

/// Drives the session lifecycle and device polling for one client.
#[derive(Debug)]
pub struct Poller {
	client: OilFoxClient,
	state: RwLock<PollState>,
	tick_guard: AsyncMutex<()>,
	metrics: PollMetrics,
}
impl Poller {
	/// Creates a poller that starts without a session (first tick logs in).
	pub fn new(client: OilFoxClient) -> Self {
		Self {
			client,
			state: RwLock::new(PollState::default()),
			tick_guard: AsyncMutex::new(()),
			metrics: PollMetrics::default(),
		}
	}

	/// Creates a poller seeded with a restored session and usage counter.
	///
	/// Hosts that persist entity state across restarts use this to avoid an
	/// unnecessary login and to keep the consumption counter monotonic.
	pub fn restored(client: OilFoxClient, session: Option<Session>, usage: UsageAccumulator) -> Self {
		Self {
			client,
			state: RwLock::new(PollState { session, usage, ..PollState::default() }),
			tick_guard: AsyncMutex::new(()),
			metrics: PollMetrics::default(),
		}
	}

	/// Returns the client backing this poller.
	pub fn client(&self) -> &OilFoxClient {
		&self.client
	}

	/// Returns the tick outcome counters.
	pub fn metrics(&self) -> &PollMetrics {
		&self.metrics
	}

	/// Last good snapshot, if any tick ever succeeded.
	pub fn last_device(&self) -> Option<DeviceState> {
		self.state.read().device.clone()
	}

	/// Current session, if one is held.
	pub fn session(&self) -> Option<Session> {
		self.state.read().session.clone()
	}

	/// Consumption totals accumulated so far.
	pub fn usage(&self) -> UsageTotals {
		self.state.read().usage.totals()
	}

	/// Runs one poll tick to completion.
	///
	/// Ticks serialize on an internal guard; a second call waits for the first to
	/// finish instead of racing it.
	pub async fn tick(&self) -> PollOutcome {
		const KIND: FlowKind = FlowKind::Tick;

		let _serial = self.tick_guard.lock().await;

		self.metrics.record_tick();

		let span = FlowSpan::new(KIND, "tick");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.run_tick()).await;
		let (device, usage) = {
			let state = self.state.read();

			(state.device.clone(), state.usage.totals())
		};

		match result {
			Ok(()) => {
				self.metrics.record_success();
				obs::record_flow_outcome(KIND, FlowOutcome::Success);

				PollOutcome { device, stale: false, usage, failure: None }
			},
			Err(err) => {
				self.metrics.record_failure();
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);

				// Any failed tick serves retained data, no matter which call
				// inside the tick went wrong.
				PollOutcome { stale: device.is_some(), device, usage, failure: Some(err) }
			},
		}
	}

	async fn run_tick(&self) -> Result<()> {
		let session = self.ensure_session().await?;
		let hwid = self.client.config().hwid.clone();

		match self.client.device(&session, &hwid).await {
			Ok(snapshot) => {
				let mut state = self.state.write();

				if let Some(quantity) = snapshot.fill_level_quantity {
					state.usage.observe(quantity);
				}

				state.device = Some(snapshot);

				Ok(())
			},
			Err(err) => {
				// A rejected bearer token means the session is dead; next tick
				// starts from a full login instead of presenting it again.
				if matches!(&err, Error::Api(ApiError::Status { status: 401 })) {
					self.state.write().session = None;
				}

				Err(err)
			},
		}
	}

	/// Returns a session fit for the device call, walking the
	/// NoSession → Valid → Stale lifecycle.
	async fn ensure_session(&self) -> Result<Session> {
		let now = OffsetDateTime::now_utc();
		let valid_for = self.client.config().token_valid;
		let current = self.state.read().session.clone();
		let Some(session) = current else {
			let fresh = self.client.login().await?;

			self.store_session(fresh.clone());

			return Ok(fresh);
		};

		if !session.is_stale_at(now, valid_for) {
			return Ok(session);
		}

		match self.client.refresh(&session).await {
			Ok(fresh) => {
				self.store_session(fresh.clone());

				Ok(fresh)
			},
			Err(_) => {
				// Stale → NoSession: the rejected refresh token is useless, so
				// fall back to one full login within the same tick.
				self.metrics.record_relogin();

				match self.client.login().await {
					Ok(fresh) => {
						self.store_session(fresh.clone());

						Ok(fresh)
					},
					Err(err) => {
						self.state.write().session = None;

						Err(err)
					},
				}
			},
		}
	}

	fn store_session(&self, session: Session) {
		self.state.write().session = Some(session);
	}
}
