//! Sensor and binary-sensor descriptors mapping telemetry to typed entity states.
//!
//! Each descriptor is one variant of an enumerated sum type carrying its stable id,
//! display name, icon, unit, and host-platform classes, replacing the stringly
//! keyed descriptor tables such integrations usually grow.

// self
use crate::{
	_prelude::*,
	device::{BatteryLevel, DeviceState},
	usage::UsageTotals,
};

/// Measurement units attached to sensor descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
	/// Relative fill level.
	Percent,
	/// Absolute liquid volume.
	Liters,
	/// Reach estimate.
	Days,
	/// Derived heating energy.
	KilowattHours,
}
impl Unit {
	/// Returns the unit symbol.
	pub const fn as_str(self) -> &'static str {
		match self {
			Unit::Percent => "%",
			Unit::Liters => "L",
			Unit::Days => "d",
			Unit::KilowattHours => "kWh",
		}
	}
}
impl Display for Unit {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Host-platform device classes hinting at entity rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
	/// Battery state entity.
	Battery,
	/// Duration entity.
	Duration,
	/// Problem-style binary entity.
	Problem,
	/// Point-in-time entity.
	Timestamp,
	/// Stored-volume entity.
	VolumeStorage,
}
impl DeviceClass {
	/// Returns a stable label suitable for host entity registries.
	pub const fn as_str(self) -> &'static str {
		match self {
			DeviceClass::Battery => "battery",
			DeviceClass::Duration => "duration",
			DeviceClass::Problem => "problem",
			DeviceClass::Timestamp => "timestamp",
			DeviceClass::VolumeStorage => "volume_storage",
		}
	}
}
impl Display for DeviceClass {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Statistical nature of a sensor, for host long-term statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateClass {
	/// Point-in-time measurement.
	Measurement,
	/// Total that may reset.
	Total,
	/// Monotonically increasing total.
	TotalIncreasing,
}
impl StateClass {
	/// Returns a stable label suitable for host entity registries.
	pub const fn as_str(self) -> &'static str {
		match self {
			StateClass::Measurement => "measurement",
			StateClass::Total => "total",
			StateClass::TotalIncreasing => "total_increasing",
		}
	}
}
impl Display for StateClass {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Typed state extracted from a snapshot for one sensor.
#[derive(Clone, Debug, PartialEq)]
pub enum SensorValue {
	/// Fractional measurement.
	Number(f64),
	/// Whole-number measurement.
	Integer(i64),
	/// Textual state.
	Text(String),
	/// Point in time.
	Timestamp(OffsetDateTime),
}
impl Display for SensorValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Number(value) => write!(f, "{value}"),
			Self::Integer(value) => write!(f, "{value}"),
			Self::Text(value) => f.write_str(value),
			Self::Timestamp(value) => write!(f, "{value}"),
		}
	}
}

/// Sensor descriptors, one per exposed entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorKind {
	/// Relative fill level.
	FillLevelPercent,
	/// Absolute remaining volume.
	FillLevelQuantity,
	/// Estimated days until empty.
	DaysReach,
	/// Battery band rendered as a percentage.
	BatteryLevel,
	/// Validation state rendered as display text.
	ValidationError,
	/// Instant of the most recent measurement.
	LastMeasurement,
	/// Instant of the next scheduled measurement.
	NextMeasurement,
	/// Derived consumption as heating energy.
	UsageEnergy,
	/// Derived consumption in litres.
	UsageQuantity,
}
impl SensorKind {
	/// Every sensor descriptor, in display order.
	pub const ALL: [Self; 9] = [
		Self::FillLevelPercent,
		Self::FillLevelQuantity,
		Self::DaysReach,
		Self::BatteryLevel,
		Self::ValidationError,
		Self::LastMeasurement,
		Self::NextMeasurement,
		Self::UsageEnergy,
		Self::UsageQuantity,
	];

	/// Stable id used in entity unique ids.
	pub const fn id(self) -> &'static str {
		match self {
			Self::FillLevelPercent => "fillLevelPercent",
			Self::FillLevelQuantity => "fillLevelQuantity",
			Self::DaysReach => "daysReach",
			Self::BatteryLevel => "batteryLevel",
			Self::ValidationError => "validationError",
			Self::LastMeasurement => "lastMeasurement",
			Self::NextMeasurement => "nextMeasurement",
			Self::UsageEnergy => "usageCounter",
			Self::UsageQuantity => "usageCounterQuantity",
		}
	}

	/// Display name shown to users.
	pub const fn display_name(self) -> &'static str {
		match self {
			Self::UsageEnergy => "energyConsumption",
			_ => self.id(),
		}
	}

	/// Material-design icon name.
	pub const fn icon(self) -> &'static str {
		match self {
			Self::FillLevelPercent => "mdi:percent",
			Self::FillLevelQuantity => "mdi:hydraulic-oil-level",
			Self::DaysReach => "mdi:calendar-range",
			Self::BatteryLevel => "mdi:battery",
			Self::ValidationError => "mdi:message-alert",
			Self::LastMeasurement => "mdi:calendar-arrow-left",
			Self::NextMeasurement => "mdi:calendar-arrow-right",
			Self::UsageEnergy => "mdi:barrel",
			Self::UsageQuantity => "mdi:barrel-outline",
		}
	}

	/// Native unit, when the sensor has one.
	pub const fn unit(self) -> Option<Unit> {
		match self {
			Self::FillLevelPercent | Self::BatteryLevel => Some(Unit::Percent),
			Self::FillLevelQuantity | Self::UsageQuantity => Some(Unit::Liters),
			Self::DaysReach => Some(Unit::Days),
			Self::UsageEnergy => Some(Unit::KilowattHours),
			Self::ValidationError | Self::LastMeasurement | Self::NextMeasurement => None,
		}
	}

	/// Host device class, when one applies.
	pub const fn device_class(self) -> Option<DeviceClass> {
		match self {
			Self::FillLevelQuantity => Some(DeviceClass::VolumeStorage),
			Self::DaysReach => Some(DeviceClass::Duration),
			Self::BatteryLevel => Some(DeviceClass::Battery),
			Self::LastMeasurement | Self::NextMeasurement => Some(DeviceClass::Timestamp),
			_ => None,
		}
	}

	/// Host state class, when one applies.
	pub const fn state_class(self) -> Option<StateClass> {
		match self {
			Self::FillLevelPercent => Some(StateClass::Total),
			Self::FillLevelQuantity | Self::DaysReach => Some(StateClass::Measurement),
			Self::UsageEnergy | Self::UsageQuantity => Some(StateClass::TotalIncreasing),
			_ => None,
		}
	}

	/// API field backing this sensor; `None` for the derived usage counters.
	pub const fn api_field(self) -> Option<&'static str> {
		match self {
			Self::LastMeasurement => Some("currentMeteringAt"),
			Self::NextMeasurement => Some("nextMeteringAt"),
			Self::UsageEnergy | Self::UsageQuantity => None,
			_ => Some(self.id()),
		}
	}

	/// Extracts the typed state for this sensor from a snapshot.
	///
	/// `None` means the API omitted the backing field; hosts keep the previous
	/// entity state in that case.
	pub fn value(self, state: &DeviceState, usage: &UsageTotals) -> Option<SensorValue> {
		match self {
			Self::FillLevelPercent => state.fill_level_percent.map(SensorValue::Number),
			Self::FillLevelQuantity => state.fill_level_quantity.map(SensorValue::Number),
			Self::DaysReach => state.days_reach.map(SensorValue::Integer),
			Self::BatteryLevel => state
				.battery_level
				.and_then(BatteryLevel::percent)
				.map(|percent| SensorValue::Integer(i64::from(percent))),
			Self::ValidationError => Some(SensorValue::Text(state.validation_display().to_owned())),
			Self::LastMeasurement => state.current_metering_at.map(SensorValue::Timestamp),
			Self::NextMeasurement => state.next_metering_at.map(SensorValue::Timestamp),
			Self::UsageEnergy => Some(SensorValue::Number(usage.energy_kwh)),
			Self::UsageQuantity => Some(SensorValue::Number(usage.liters)),
		}
	}
}

/// Binary-sensor descriptors derived from the same snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinarySensorKind {
	/// Snapshot carries a validation error.
	ValidationErrorStatus,
	/// Battery band maps to "low battery".
	BatteryLevelStatus,
}
impl BinarySensorKind {
	/// Every binary-sensor descriptor, in display order.
	pub const ALL: [Self; 2] = [Self::ValidationErrorStatus, Self::BatteryLevelStatus];

	/// Stable id used in entity unique ids.
	pub const fn id(self) -> &'static str {
		match self {
			Self::ValidationErrorStatus => "validationErrorStatus",
			Self::BatteryLevelStatus => "batteryLevelStatus",
		}
	}

	/// Material-design icon name.
	pub const fn icon(self) -> &'static str {
		match self {
			Self::ValidationErrorStatus => "mdi:alert-circle",
			Self::BatteryLevelStatus => "mdi:battery-alert",
		}
	}

	/// Host device class.
	pub const fn device_class(self) -> DeviceClass {
		match self {
			Self::ValidationErrorStatus => DeviceClass::Problem,
			Self::BatteryLevelStatus => DeviceClass::Battery,
		}
	}

	/// Evaluates the binary state against a snapshot.
	pub fn is_on(self, state: &DeviceState) -> bool {
		match self {
			Self::ValidationErrorStatus => state.has_validation_error(),
			Self::BatteryLevelStatus => state.battery_low(),
		}
	}
}
