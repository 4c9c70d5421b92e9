//! Session model for the customer-API token pair.

pub mod id;
pub mod secret;

pub use id::*;
pub use secret::*;

// self
use crate::_prelude::*;

/// Server-asserted access-token lifetime after which a refresh is required.
pub const TOKEN_VALID: Duration = Duration::seconds(900);

/// Lifecycle status of a session relative to the access-token lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
	/// Access token is still inside its lifetime.
	Valid,
	/// Access token exceeded its lifetime; refresh before the next call.
	Stale,
}

/// Token pair issued by the login and token endpoints.
///
/// The server returns both tokens in one response, so a session can never hold an
/// access token without its paired refresh token. Sessions are replaced wholesale
/// on every successful login or refresh, never mutated in place.
#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
	/// Short-lived bearer token for the device endpoints.
	pub access_token: TokenSecret,
	/// Longer-lived token exchanged at the token endpoint.
	pub refresh_token: TokenSecret,
	/// Instant both tokens were issued.
	pub issued_at: OffsetDateTime,
}
impl Session {
	/// Creates a session from a complete token response.
	pub fn new(
		access_token: impl Into<String>,
		refresh_token: impl Into<String>,
		issued_at: OffsetDateTime,
	) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: TokenSecret::new(refresh_token),
			issued_at,
		}
	}

	/// Convenience helper that stamps `issued_at` with the current clock.
	pub fn issued_now(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
		Self::new(access_token, refresh_token, OffsetDateTime::now_utc())
	}

	/// Age of the session at the provided instant.
	pub fn age_at(&self, instant: OffsetDateTime) -> Duration {
		instant - self.issued_at
	}

	/// Computes the lifecycle status at a given instant for the provided lifetime.
	pub fn status_at(&self, instant: OffsetDateTime, valid_for: Duration) -> SessionStatus {
		if self.age_at(instant) > valid_for { SessionStatus::Stale } else { SessionStatus::Valid }
	}

	/// Returns `true` if the session must be refreshed before the next call.
	pub fn is_stale_at(&self, instant: OffsetDateTime, valid_for: Duration) -> bool {
		matches!(self.status_at(instant, valid_for), SessionStatus::Stale)
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn status_follows_token_lifetime() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let session = Session::new("access", "refresh", issued);

		assert_eq!(
			session.status_at(issued + Duration::seconds(899), TOKEN_VALID),
			SessionStatus::Valid,
		);
		assert_eq!(
			session.status_at(issued + Duration::seconds(900), TOKEN_VALID),
			SessionStatus::Valid,
		);
		assert!(session.is_stale_at(issued + Duration::seconds(901), TOKEN_VALID));
	}

	#[test]
	fn debug_redacts_both_tokens() {
		let session = Session::issued_now("tok-a-123", "tok-r-456");
		let rendered = format!("{session:?}");

		assert!(!rendered.contains("tok-a-123"));
		assert!(!rendered.contains("tok-r-456"));
		assert!(rendered.contains("<redacted>"));
	}
}
