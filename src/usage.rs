//! Derived oil-consumption accumulator over successive fill-level readings.

// self
use crate::_prelude::*;

/// Energy content of one litre of heating oil, used to derive kWh from litres.
pub const KWH_PER_L_OIL: f64 = 9.8;

/// Monotone consumption totals derived by the accumulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageTotals {
	/// Total litres consumed since the accumulator was created.
	pub liters: f64,
	/// Same total expressed as heating energy.
	pub energy_kwh: f64,
}

/// Infers consumption from successive `fillLevelQuantity` readings.
///
/// Drops add to the counter; a refill only reseeds the reference level; the
/// first-ever reading seeds with no counter change. The counter never decrements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageAccumulator {
	previous_level: Option<f64>,
	consumed_liters: f64,
}
impl UsageAccumulator {
	/// Creates an empty accumulator.
	pub fn new() -> Self {
		Self::default()
	}

	/// Restores an accumulator from host-persisted totals.
	pub fn restore(previous_level: Option<f64>, consumed_liters: f64) -> Self {
		Self { previous_level, consumed_liters: consumed_liters.max(0.) }
	}

	/// Feeds one fill-level reading into the counter.
	pub fn observe(&mut self, level: f64) {
		if let Some(previous) = self.previous_level
			&& level < previous
		{
			self.consumed_liters += previous - level;
		}

		self.previous_level = Some(level);
	}

	/// Reference level the next reading will be compared against.
	pub fn previous_level(&self) -> Option<f64> {
		self.previous_level
	}

	/// Total litres consumed so far.
	pub fn consumed_liters(&self) -> f64 {
		self.consumed_liters
	}

	/// Total consumption expressed as heating energy.
	pub fn consumed_energy_kwh(&self) -> f64 {
		self.consumed_liters * KWH_PER_L_OIL
	}

	/// Snapshot of both totals.
	pub fn totals(&self) -> UsageTotals {
		UsageTotals { liters: self.consumed_liters, energy_kwh: self.consumed_energy_kwh() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn drops_accumulate_and_refills_only_reseed() {
		let mut usage = UsageAccumulator::new();

		for level in [100., 80., 80., 90., 60.] {
			usage.observe(level);
		}

		assert_eq!(usage.consumed_liters(), 50.);
		assert_eq!(usage.previous_level(), Some(60.));
	}

	#[test]
	fn first_reading_seeds_without_counting() {
		let mut usage = UsageAccumulator::new();

		usage.observe(250.);

		assert_eq!(usage.consumed_liters(), 0.);
		assert_eq!(usage.previous_level(), Some(250.));
	}

	#[test]
	fn energy_total_uses_the_fixed_factor() {
		let mut usage = UsageAccumulator::new();

		usage.observe(10.);
		usage.observe(5.);

		assert_eq!(usage.consumed_energy_kwh(), 5. * KWH_PER_L_OIL);
		assert_eq!(usage.totals(), UsageTotals { liters: 5., energy_kwh: 5. * KWH_PER_L_OIL });
	}

	#[test]
	fn restore_clamps_negative_totals() {
		let usage = UsageAccumulator::restore(Some(40.), -3.);

		assert_eq!(usage.consumed_liters(), 0.);
		assert_eq!(usage.previous_level(), Some(40.));
	}
}
