//! Error taxonomy shared by the client, poller, and configuration layers.
//!
//! Authentication rejections, data-fetch failures, and transport problems are kept
//! apart on purpose: hosts route [`AuthError`] to "reconfigure", log [`ApiError`]
//! while retaining the previous snapshot, and treat [`TransportError`] as transient
//! until the next tick.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// JSON decode failure annotated with the path of the offending field.
pub type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credentials or tokens were rejected; the user must reconfigure.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Data fetch failed; the previous snapshot stays valid.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout); retry on the next tick.
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Returns `true` when the failure requires fresh credentials rather than a retry.
	pub fn is_auth(&self) -> bool {
		matches!(self, Self::Auth(_))
	}

	/// Returns `true` when the failure is expected to clear without intervention.
	pub fn is_transient(&self) -> bool {
		match self {
			Self::Transport(_) => true,
			Self::Api(api) => api.status().is_some_and(|status| status >= 500),
			_ => false,
		}
	}
}

/// Authentication failures from the login and token endpoints.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Login endpoint rejected the email/password pair.
	#[error("Login was rejected by the API [{status}].")]
	LoginRejected {
		/// HTTP status returned by the login endpoint.
		status: u16,
	},
	/// Token endpoint rejected the refresh token; callers fall back to a full login.
	#[error("Refresh token was rejected by the API [{status}].")]
	RefreshRejected {
		/// HTTP status returned by the token endpoint.
		status: u16,
	},
	/// Token endpoint answered 200 with a body that is not a token pair.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedTokenResponse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
}

/// Failures raised while fetching device telemetry with a valid-looking session.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Device endpoint returned a non-success status.
	#[error("Device endpoint returned HTTP {status}.")]
	Status {
		/// HTTP status carried for host-side classification.
		status: u16,
	},
	/// Device endpoint answered 200 with a body that is not a telemetry snapshot.
	#[error("Device endpoint returned malformed JSON.")]
	MalformedDeviceResponse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
}
impl ApiError {
	/// HTTP status associated with the failure, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status } => Some(*status),
			Self::MalformedDeviceResponse { .. } => None,
		}
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL must use HTTPS; tokens travel in headers and bodies.
	#[error("Base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Base URL cannot serve as a base for endpoint paths.
	#[error("Endpoint paths cannot be joined onto the base URL: {url}.")]
	UnusableBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Endpoint URL could not be derived from the base URL.
	#[error("Endpoint URL could not be derived from the base URL.")]
	Endpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Account email failed the plausibility check.
	#[error("Email address is implausible: {email}.")]
	InvalidEmail {
		/// Offending address.
		email: String,
	},
	/// Hardware identifier failed validation.
	#[error(transparent)]
	InvalidHwid(#[from] crate::session::HwIdError),
	/// Per-request timeout must be positive.
	#[error("HTTP timeout must be positive.")]
	NonPositiveTimeout,
	/// Access-token lifetime must be positive.
	#[error("Token lifetime must be positive.")]
	NonPositiveTokenLifetime,
}
impl ConfigError {
	/// Wraps a transport builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, TLS, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The request exceeded the configured timeout; only that call is aborted.
	#[error("Request to the API timed out.")]
	Timeout,
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout } else { Self::network(e) }
	}
}
