//! Validated hardware identifier used as the device resource key.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const HWID_MAX_LEN: usize = 64;

/// Error returned when hardware-identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum HwIdError {
	/// The identifier was empty.
	#[error("Hardware identifier cannot be empty.")]
	Empty,
	/// The identifier contains a character outside the accepted alphabet.
	#[error("Hardware identifier contains an invalid character: {found:?}.")]
	InvalidCharacter {
		/// First offending character.
		found: char,
	},
	/// The identifier exceeded the allowed character count.
	#[error("Hardware identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Hardware identifier (`hwid`) of one OilFox device.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HwId(String);
impl HwId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, HwIdError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for HwId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for HwId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<HwId> for String {
	fn from(value: HwId) -> Self {
		value.0
	}
}
impl TryFrom<String> for HwId {
	type Error = HwIdError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for HwId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for HwId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "HwId({})", self.0)
	}
}
impl Display for HwId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for HwId {
	type Err = HwIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

// Identifiers end up as a URL path segment, so anything outside the
// alphanumeric alphabet could steer the request to a different resource.
fn validate_view(view: &str) -> Result<(), HwIdError> {
	if view.is_empty() {
		return Err(HwIdError::Empty);
	}
	if let Some(found) = view.chars().find(|c| !c.is_ascii_alphanumeric()) {
		return Err(HwIdError::InvalidCharacter { found });
	}
	if view.len() > HWID_MAX_LEN {
		return Err(HwIdError::TooLong { max: HWID_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn hwid_validates_shape() {
		assert_eq!(HwId::new(""), Err(HwIdError::Empty));
		assert_eq!(HwId::new("AB 123"), Err(HwIdError::InvalidCharacter { found: ' ' }));
		assert_eq!(
			HwId::new("a".repeat(HWID_MAX_LEN + 1)),
			Err(HwIdError::TooLong { max: HWID_MAX_LEN })
		);

		let hwid = HwId::new("XY123456789").expect("Hwid fixture should be valid.");

		assert_eq!(hwid.as_ref(), "XY123456789");
		assert_eq!(format!("{hwid:?}"), "HwId(XY123456789)");
	}

	#[test]
	fn hwid_rejects_path_significant_characters() {
		for (raw, found) in
			[("../XY1", '.'), ("XY1/other", '/'), ("XY1?x=1", '?'), ("XY1#frag", '#')]
		{
			assert_eq!(HwId::new(raw), Err(HwIdError::InvalidCharacter { found }), "raw: {raw}");
		}
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let hwid: HwId =
			serde_json::from_str("\"XY1337\"").expect("Hwid should deserialize successfully.");

		assert_eq!(hwid.as_ref(), "XY1337");
		assert!(serde_json::from_str::<HwId>("\"with space\"").is_err());
		assert!(serde_json::from_str::<HwId>("\"\"").is_err());
	}
}
