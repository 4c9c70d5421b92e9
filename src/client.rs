//! Stateless operations against the customer-API endpoints.
//!
//! Each helper performs exactly one HTTP call with no retries; the poll layer owns
//! fallback decisions (refresh, relogin) and the host timer owns retry cadence.

// self
use crate::{
	_prelude::*,
	config::ClientConfig,
	device::{DeviceInventory, DeviceState},
	error::{ApiError, AuthError, ConfigError},
	http::{HttpReply, ReqwestHttpClient},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	session::{HwId, Session},
};

/// Wire payload returned by both token endpoints.
///
/// Both tokens always arrive together; a [`Session`] is only ever built from a
/// complete pair.
#[derive(Debug, Deserialize)]
struct TokenResponse {
	access_token: String,
	refresh_token: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
	email: &'a str,
	password: &'a str,
}

// The token endpoint takes the refresh grant form-encoded, unlike the JSON login.
#[derive(Serialize)]
struct RefreshBody<'a> {
	refresh_token: &'a str,
}

/// Client for one configured account/device pair.
#[derive(Clone, Debug)]
pub struct OilFoxClient {
	config: ClientConfig,
	http: ReqwestHttpClient,
}
impl OilFoxClient {
	/// Creates a client with the crate's default transport.
	pub fn new(config: ClientConfig) -> Result<Self> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?))
	}

	/// Creates a client that reuses a caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http: ReqwestHttpClient) -> Self {
		Self { config, http }
	}

	/// Returns the validated configuration backing this client.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Exchanges the configured credentials for a fresh [`Session`].
	///
	/// One attempt only; any non-success status maps to
	/// [`AuthError::LoginRejected`] and the host should prompt for reconfiguration.
	pub async fn login(&self) -> Result<Session> {
		const KIND: FlowKind = FlowKind::Login;

		let span = FlowSpan::new(KIND, "login");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoint("login")?;
				let body = LoginBody {
					email: &self.config.email,
					password: self.config.password.expose(),
				};
				let reply = self.http.post_json(url, &body, self.config.timeout).await?;

				session_from_reply(reply, |status| AuthError::LoginRejected { status })
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Exchanges the session's refresh token for a fresh [`Session`].
	///
	/// On failure the caller must fall back to a full [`login`](Self::login); the
	/// rejected session is not reusable.
	pub async fn refresh(&self, session: &Session) -> Result<Session> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoint("token")?;
				let body = RefreshBody { refresh_token: session.refresh_token.expose() };
				let reply = self.http.post_form(url, &body, self.config.timeout).await?;

				session_from_reply(reply, |status| AuthError::RefreshRejected { status })
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Fetches the telemetry snapshot of one device.
	pub async fn device(&self, session: &Session, hwid: &HwId) -> Result<DeviceState> {
		const KIND: FlowKind = FlowKind::Device;

		let span = FlowSpan::new(KIND, "device");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoint(&format!("device/{hwid}"))?;
				let reply = self
					.http
					.get(url, Some(session.access_token.expose()), self.config.timeout)
					.await?;

				decode_api_reply(reply)
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Fetches every device registered to the account.
	///
	/// Hosts use this once during setup to discover tanks before polling them
	/// individually.
	pub async fn devices(&self, session: &Session) -> Result<DeviceInventory> {
		const KIND: FlowKind = FlowKind::Inventory;

		let span = FlowSpan::new(KIND, "devices");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoint("device")?;
				let reply = self
					.http
					.get(url, Some(session.access_token.expose()), self.config.timeout)
					.await?;

				decode_api_reply(reply)
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Connectivity probe against the API origin; no credentials involved.
	pub async fn ping(&self) -> Result<bool> {
		let mut url = self.config.base_url.clone();

		url.set_path("/");

		let reply = self.http.get(url, None, self.config.timeout).await?;

		Ok(reply.is_success())
	}

	/// Credential probe used by host setup forms; a successful login is the proof.
	pub async fn authenticate(&self) -> Result<Session> {
		self.login().await
	}

	fn endpoint(&self, path: &str) -> Result<Url> {
		self.config
			.base_url
			.join(path)
			.map_err(|source| ConfigError::Endpoint { source }.into())
	}
}

fn session_from_reply(reply: HttpReply, reject: impl FnOnce(u16) -> AuthError) -> Result<Session> {
	if !reply.is_success() {
		return Err(reject(reply.status).into());
	}

	let parsed: TokenResponse = reply
		.decode()
		.map_err(|source| AuthError::MalformedTokenResponse { source })?;

	Ok(Session::issued_now(parsed.access_token, parsed.refresh_token))
}

fn decode_api_reply<T>(reply: HttpReply) -> Result<T>
where
	T: serde::de::DeserializeOwned,
{
	if !reply.is_success() {
		return Err(ApiError::Status { status: reply.status }.into());
	}

	reply
		.decode()
		.map_err(|source| ApiError::MalformedDeviceResponse { source }.into())
}

fn record_result<T>(kind: FlowKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_flow_outcome(kind, FlowOutcome::Success),
		Err(_) => obs::record_flow_outcome(kind, FlowOutcome::Failure),
	}
}
