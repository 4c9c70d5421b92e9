//! Per-instance client configuration with validated construction.
//!
//! Every knob lives on the instance; there are no process-wide mutable defaults.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	session::{HwId, TokenSecret},
};

/// Default customer-API base URL. The trailing slash matters: endpoint paths are
/// joined relative to it.
pub const DEFAULT_BASE_URL: &str = "https://api.oilfox.io/customer-api/v1/";
/// Default per-request HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::seconds(300);
/// Default poll-interval hint handed to host schedulers.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::minutes(30);

/// Validated configuration for one account/device pair.
#[derive(Clone)]
pub struct ClientConfig {
	/// Account email used by the login endpoint.
	pub email: String,
	/// Account password used by the login endpoint.
	pub password: TokenSecret,
	/// Hardware identifier of the polled device.
	pub hwid: HwId,
	/// API base URL; endpoint paths are joined relative to it.
	pub base_url: Url,
	/// Per-request timeout applied to every network call.
	pub timeout: Duration,
	/// Access-token lifetime after which a refresh is required.
	pub token_valid: Duration,
	/// Poll-interval hint for the host scheduler; the crate never schedules itself.
	pub poll_interval: Duration,
}
impl ClientConfig {
	/// Returns a builder seeded with the credentials and device identifier.
	pub fn builder(
		email: impl Into<String>,
		password: impl Into<String>,
		hwid: HwId,
	) -> ClientConfigBuilder {
		ClientConfigBuilder::new(email, password, hwid)
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.field("hwid", &self.hwid)
			.field("base_url", &self.base_url.as_str())
			.field("timeout", &self.timeout)
			.field("token_valid", &self.token_valid)
			.field("poll_interval", &self.poll_interval)
			.finish()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	email: String,
	password: TokenSecret,
	hwid: HwId,
	base_url: Option<Url>,
	timeout: Duration,
	token_valid: Duration,
	poll_interval: Duration,
}
impl ClientConfigBuilder {
	fn new(email: impl Into<String>, password: impl Into<String>, hwid: HwId) -> Self {
		Self {
			email: email.into(),
			password: TokenSecret::new(password),
			hwid,
			base_url: None,
			timeout: DEFAULT_TIMEOUT,
			token_valid: crate::session::TOKEN_VALID,
			poll_interval: DEFAULT_POLL_INTERVAL,
		}
	}

	/// Overrides the API base URL (useful for mock servers in tests).
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the per-request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the access-token lifetime.
	pub fn token_valid(mut self, valid_for: Duration) -> Self {
		self.token_valid = valid_for;

		self
	}

	/// Overrides the poll-interval hint.
	pub fn poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;

		self
	}

	/// Validates the accumulated fields and produces a [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)
				.map_err(|source| ConfigError::Endpoint { source })?,
		};

		if base_url.scheme() != "https" {
			return Err(ConfigError::InsecureBaseUrl { url: base_url.into() });
		}
		if base_url.cannot_be_a_base() {
			return Err(ConfigError::UnusableBaseUrl { url: base_url.into() });
		}
		if !plausible_email(&self.email) {
			return Err(ConfigError::InvalidEmail { email: self.email });
		}
		if !self.timeout.is_positive() {
			return Err(ConfigError::NonPositiveTimeout);
		}
		if !self.token_valid.is_positive() {
			return Err(ConfigError::NonPositiveTokenLifetime);
		}

		Ok(ClientConfig {
			email: self.email,
			password: self.password,
			hwid: self.hwid,
			base_url,
			timeout: self.timeout,
			token_valid: self.token_valid,
			poll_interval: self.poll_interval,
		})
	}
}

fn plausible_email(view: &str) -> bool {
	let Some((local, domain)) = view.split_once('@') else {
		return false;
	};

	!local.is_empty() && !domain.is_empty() && !view.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn hwid() -> HwId {
		HwId::new("XY1").expect("Hwid fixture should be valid.")
	}

	#[test]
	fn build_applies_documented_defaults() {
		let config = ClientConfig::builder("user@example.com", "pw", hwid())
			.build()
			.expect("Default configuration should build successfully.");

		assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
		assert_eq!(config.timeout, DEFAULT_TIMEOUT);
		assert_eq!(config.token_valid, Duration::seconds(900));
		assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
	}

	#[test]
	fn build_rejects_insecure_base_url() {
		let err = ClientConfig::builder("user@example.com", "pw", hwid())
			.base_url(Url::parse("http://api.oilfox.io/").expect("URL fixture should parse."))
			.build()
			.expect_err("Plain HTTP base URLs must be rejected.");

		assert!(matches!(err, ConfigError::InsecureBaseUrl { .. }));
	}

	#[test]
	fn build_rejects_implausible_emails() {
		for email in ["", "no-at-sign", "@domain", "local@", "two words@example.com"] {
			let err = ClientConfig::builder(email, "pw", hwid())
				.build()
				.expect_err("Implausible email addresses must be rejected.");

			assert!(matches!(err, ConfigError::InvalidEmail { .. }), "email: {email}");
		}
	}

	#[test]
	fn build_rejects_non_positive_durations() {
		let err = ClientConfig::builder("user@example.com", "pw", hwid())
			.timeout(Duration::ZERO)
			.build()
			.expect_err("Zero timeout must be rejected.");

		assert!(matches!(err, ConfigError::NonPositiveTimeout));

		let err = ClientConfig::builder("user@example.com", "pw", hwid())
			.token_valid(Duration::seconds(-1))
			.build()
			.expect_err("Negative token lifetime must be rejected.");

		assert!(matches!(err, ConfigError::NonPositiveTokenLifetime));
	}

	#[test]
	fn debug_redacts_the_password() {
		let config = ClientConfig::builder("user@example.com", "hunter2", hwid())
			.build()
			.expect("Configuration fixture should build successfully.");
		let rendered = format!("{config:?}");

		assert!(!rendered.contains("hunter2"));
		assert!(rendered.contains("<redacted>"));
	}
}
