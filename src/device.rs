//! Typed telemetry snapshots returned by the device endpoints.
//!
//! Snapshots replace the previous one wholesale; nothing is ever merged. Every
//! telemetry field is optional because the API omits values whose measurement
//! failed validation—only the hardware identifier is guaranteed.

// self
use crate::{_prelude::*, session::HwId};

/// Battery charge bands reported by the device.
///
/// Bands the API grows later deserialize to [`Unknown`](Self::Unknown) instead of
/// failing the whole snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BatteryLevel {
	/// Battery is full.
	Full,
	/// Battery is in good shape.
	Good,
	/// Battery is half way through its life.
	Medium,
	/// Battery is low; plan a replacement.
	Warning,
	/// Battery is almost dead.
	Critical,
	/// Band this crate does not know about.
	Unknown,
}
impl BatteryLevel {
	/// Returns `true` exactly for the WARNING and CRITICAL bands.
	pub fn is_low(self) -> bool {
		matches!(self, Self::Warning | Self::Critical)
	}

	/// Display percentage for the band, if it maps to one.
	pub fn percent(self) -> Option<u8> {
		match self {
			Self::Full => Some(100),
			Self::Good => Some(70),
			Self::Medium => Some(50),
			Self::Warning => Some(20),
			Self::Critical => Some(0),
			Self::Unknown => None,
		}
	}

	/// Wire code for the band.
	pub const fn code(self) -> &'static str {
		match self {
			Self::Full => "FULL",
			Self::Good => "GOOD",
			Self::Medium => "MEDIUM",
			Self::Warning => "WARNING",
			Self::Critical => "CRITICAL",
			Self::Unknown => "UNKNOWN",
		}
	}
}
impl From<String> for BatteryLevel {
	fn from(value: String) -> Self {
		match value.as_str() {
			"FULL" => Self::Full,
			"GOOD" => Self::Good,
			"MEDIUM" => Self::Medium,
			"WARNING" => Self::Warning,
			"CRITICAL" => Self::Critical,
			_ => Self::Unknown,
		}
	}
}
impl From<BatteryLevel> for String {
	fn from(value: BatteryLevel) -> Self {
		value.code().to_owned()
	}
}

/// Validation codes attached to snapshots whose measurement could not be trusted.
///
/// Unknown codes survive round-trips verbatim instead of failing deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValidationError {
	/// No measurement has been taken yet.
	NoMetering,
	/// The measurement came back empty.
	EmptyMetering,
	/// No fill level could be extracted from the measurement.
	NoExtractedValue,
	/// The sensor configuration produced a faulty measurement.
	SensorConfig,
	/// The tank storage configuration is missing.
	MissingStorageConfig,
	/// The tank storage configuration is incorrect.
	InvalidStorageConfig,
	/// The measured distance was too small to be usable.
	DistanceTooShort,
	/// The calculated level sits above the configured maximum.
	AboveStorageMax,
	/// The calculated level sits below the configured minimum.
	BelowStorageMin,
	/// Unrecognized code passed through verbatim.
	Other(String),
}
impl ValidationError {
	/// Display value used when the API omits the field entirely.
	pub const NO_ERROR: &'static str = "No Error";

	/// Wire code for the error.
	pub fn code(&self) -> &str {
		match self {
			Self::NoMetering => "NO_METERING",
			Self::EmptyMetering => "EMPTY_METERING",
			Self::NoExtractedValue => "NO_EXTRACTED_VALUE",
			Self::SensorConfig => "SENSOR_CONFIG",
			Self::MissingStorageConfig => "MISSING_STORAGE_CONFIG",
			Self::InvalidStorageConfig => "INVALID_STORAGE_CONFIG",
			Self::DistanceTooShort => "DISTANCE_TOO_SHORT",
			Self::AboveStorageMax => "ABOVE_STORAGE_MAX",
			Self::BelowStorageMin => "BELOW_STORAGE_MIN",
			Self::Other(code) => code,
		}
	}

	/// Human-readable display text; unknown codes pass through verbatim.
	pub fn display_text(&self) -> &str {
		match self {
			Self::NoMetering => "No measurement yet",
			Self::EmptyMetering => "Incorrect Measurement",
			Self::NoExtractedValue => "No fill level detected",
			Self::SensorConfig => "Faulty measurement",
			Self::MissingStorageConfig => "Storage configuration missing",
			Self::InvalidStorageConfig => "Incorrect storage configuration",
			Self::DistanceTooShort => "Measured distance too small",
			Self::AboveStorageMax => "Storage full",
			Self::BelowStorageMin => "Calculated filling level implausible",
			Self::Other(code) => code,
		}
	}
}
impl From<String> for ValidationError {
	fn from(value: String) -> Self {
		match value.as_str() {
			"NO_METERING" => Self::NoMetering,
			"EMPTY_METERING" => Self::EmptyMetering,
			"NO_EXTRACTED_VALUE" => Self::NoExtractedValue,
			"SENSOR_CONFIG" => Self::SensorConfig,
			"MISSING_STORAGE_CONFIG" => Self::MissingStorageConfig,
			"INVALID_STORAGE_CONFIG" => Self::InvalidStorageConfig,
			"DISTANCE_TOO_SHORT" => Self::DistanceTooShort,
			"ABOVE_STORAGE_MAX" => Self::AboveStorageMax,
			"BELOW_STORAGE_MIN" => Self::BelowStorageMin,
			_ => Self::Other(value),
		}
	}
}
impl From<ValidationError> for String {
	fn from(value: ValidationError) -> Self {
		match value {
			ValidationError::Other(code) => code,
			known => known.code().to_owned(),
		}
	}
}
impl Display for ValidationError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.display_text())
	}
}

/// Unit of the absolute fill quantity.
///
/// Units the API grows later pass through verbatim, like the other telemetry
/// enums.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuantityUnit {
	/// Litres (liquid tanks).
	Liters,
	/// Kilograms (pellet storages).
	Kilograms,
	/// Unrecognized unit symbol passed through verbatim.
	Other(String),
}
impl QuantityUnit {
	/// Wire symbol for the unit.
	pub fn symbol(&self) -> &str {
		match self {
			Self::Liters => "L",
			Self::Kilograms => "kg",
			Self::Other(symbol) => symbol,
		}
	}
}
impl From<String> for QuantityUnit {
	fn from(value: String) -> Self {
		match value.as_str() {
			"L" => Self::Liters,
			"kg" => Self::Kilograms,
			_ => Self::Other(value),
		}
	}
}
impl From<QuantityUnit> for String {
	fn from(value: QuantityUnit) -> Self {
		match value {
			QuantityUnit::Other(symbol) => symbol,
			known => known.symbol().to_owned(),
		}
	}
}

/// Telemetry snapshot of one device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceState {
	/// Hardware identifier of the device.
	pub hwid: HwId,
	/// Relative fill level in percent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fill_level_percent: Option<f64>,
	/// Absolute remaining quantity, in [`quantity_unit`](Self::quantity_unit).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fill_level_quantity: Option<f64>,
	/// Estimated days until the tank runs dry.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub days_reach: Option<i64>,
	/// Battery charge band.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub battery_level: Option<BatteryLevel>,
	/// Unit of the absolute quantity.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub quantity_unit: Option<QuantityUnit>,
	/// Validation code when the last measurement could not be trusted.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validation_error: Option<ValidationError>,
	/// Instant of the most recent measurement.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub current_metering_at: Option<OffsetDateTime>,
	/// Instant of the next scheduled measurement.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub next_metering_at: Option<OffsetDateTime>,
}
impl DeviceState {
	/// Returns `true` when the snapshot carries a validation error.
	pub fn has_validation_error(&self) -> bool {
		self.validation_error.is_some()
	}

	/// Display text for the validation state; an absent field reads "No Error".
	pub fn validation_display(&self) -> &str {
		self.validation_error
			.as_ref()
			.map_or(ValidationError::NO_ERROR, ValidationError::display_text)
	}

	/// Returns `true` when the battery band maps to "low battery".
	pub fn battery_low(&self) -> bool {
		self.battery_level.is_some_and(BatteryLevel::is_low)
	}
}

/// Collection payload returned by the bare `device` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceInventory {
	/// Every device registered to the account.
	pub items: Vec<DeviceState>,
}
impl DeviceInventory {
	/// Finds the snapshot for a specific device, if the account owns it.
	pub fn find(&self, hwid: &HwId) -> Option<&DeviceState> {
		self.items.iter().find(|state| &state.hwid == hwid)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn battery_low_mapping_matches_bands() {
		assert!(BatteryLevel::Warning.is_low());
		assert!(BatteryLevel::Critical.is_low());

		for level in [BatteryLevel::Full, BatteryLevel::Good, BatteryLevel::Medium] {
			assert!(!level.is_low(), "{level:?} must not map to low battery");
		}

		assert!(!BatteryLevel::Unknown.is_low());
		assert_eq!(BatteryLevel::Full.percent(), Some(100));
		assert_eq!(BatteryLevel::Critical.percent(), Some(0));
		assert_eq!(BatteryLevel::Unknown.percent(), None);
	}

	#[test]
	fn battery_unknown_bands_deserialize() {
		let level: BatteryLevel = serde_json::from_str("\"SOLAR\"")
			.expect("Unknown battery bands should deserialize to the passthrough variant.");

		assert_eq!(level, BatteryLevel::Unknown);
	}

	#[test]
	fn quantity_unit_unknown_symbols_pass_through() {
		let state: DeviceState =
			serde_json::from_str(r#"{"hwid":"XY9","fillLevelQuantity":2.5,"quantityUnit":"m3"}"#)
				.expect("Snapshot with an unknown unit should still deserialize.");

		assert_eq!(state.quantity_unit, Some(QuantityUnit::Other("m3".to_owned())));
		assert_eq!(state.quantity_unit.as_ref().map(QuantityUnit::symbol), Some("m3"));
		assert_eq!(QuantityUnit::Liters.symbol(), "L");
		assert_eq!(QuantityUnit::Kilograms.symbol(), "kg");
	}

	#[test]
	fn validation_error_table_maps_known_codes() {
		let err = ValidationError::from("NO_METERING".to_owned());

		assert_eq!(err, ValidationError::NoMetering);
		assert_eq!(err.display_text(), "No measurement yet");
		assert_eq!(err.code(), "NO_METERING");
	}

	#[test]
	fn validation_error_unknown_codes_pass_through_verbatim() {
		let err = ValidationError::from("FLUX_DRIFT".to_owned());

		assert_eq!(err, ValidationError::Other("FLUX_DRIFT".to_owned()));
		assert_eq!(err.display_text(), "FLUX_DRIFT");
		assert_eq!(String::from(err), "FLUX_DRIFT");
	}

	#[test]
	fn snapshot_parses_the_full_wire_shape() {
		let payload = r#"{
			"hwid": "XY123",
			"fillLevelPercent": 92.0,
			"fillLevelQuantity": 1842.0,
			"daysReach": 211,
			"batteryLevel": "GOOD",
			"quantityUnit": "L",
			"currentMeteringAt": "2025-03-01T05:30:00Z",
			"nextMeteringAt": "2025-03-02T05:30:00Z"
		}"#;
		let state: DeviceState =
			serde_json::from_str(payload).expect("Full snapshot should deserialize.");

		assert_eq!(state.hwid.as_ref(), "XY123");
		assert_eq!(state.fill_level_percent, Some(92.0));
		assert_eq!(state.quantity_unit, Some(QuantityUnit::Liters));
		assert_eq!(state.battery_level, Some(BatteryLevel::Good));
		assert!(!state.has_validation_error());
		assert_eq!(state.validation_display(), ValidationError::NO_ERROR);
		assert!(state.current_metering_at.is_some());
	}

	#[test]
	fn snapshot_tolerates_missing_telemetry() {
		let state: DeviceState =
			serde_json::from_str(r#"{"hwid":"XY9","validationError":"NO_METERING"}"#)
				.expect("Sparse snapshot should deserialize.");

		assert_eq!(state.fill_level_quantity, None);
		assert_eq!(state.days_reach, None);
		assert!(state.has_validation_error());
		assert_eq!(state.validation_display(), "No measurement yet");
		assert!(!state.battery_low());
	}

	#[test]
	fn inventory_lookup_matches_on_hwid() {
		let inventory: DeviceInventory =
			serde_json::from_str(r#"{"items":[{"hwid":"A1"},{"hwid":"B2"}]}"#)
				.expect("Inventory payload should deserialize.");
		let hwid = HwId::new("B2").expect("Hwid fixture should be valid.");

		assert_eq!(
			inventory.find(&hwid).map(|state| state.hwid.as_ref()),
			Some("B2"),
		);
		assert!(
			inventory.find(&HwId::new("C3").expect("Hwid fixture should be valid.")).is_none()
		);
	}
}
