//! Transport primitives shared by every API call.
//!
//! A thin wrapper around [`ReqwestClient`] keeps shared HTTP behavior in one place.
//! The API returns results directly from every endpoint, so redirects are never
//! followed; bearer tokens must not leak to a redirect target. Each request
//! carries its own timeout, and a timed-out call aborts that call only.

// std
use std::ops::Deref;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, JsonPathError, TransportError},
};

/// Thin wrapper around [`ReqwestClient`] configured for the customer API.
///
/// Custom clients passed to [`with_client`](Self::with_client) should disable
/// redirect following for the same reason the default constructor does.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(ReqwestClient);
impl ReqwestHttpClient {
	/// Builds the default client with redirect following disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}

	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// POSTs a JSON body and captures the reply.
	pub(crate) async fn post_json<B>(
		&self,
		url: Url,
		body: &B,
		timeout: Duration,
	) -> Result<HttpReply, TransportError>
	where
		B: Serialize + Sync,
	{
		self.execute(self.0.post(url).timeout(timeout.unsigned_abs()).json(body)).await
	}

	/// POSTs a form-encoded body and captures the reply.
	pub(crate) async fn post_form<B>(
		&self,
		url: Url,
		body: &B,
		timeout: Duration,
	) -> Result<HttpReply, TransportError>
	where
		B: Serialize + Sync,
	{
		self.execute(self.0.post(url).timeout(timeout.unsigned_abs()).form(body)).await
	}

	/// GETs a resource, optionally with a bearer token, and captures the reply.
	pub(crate) async fn get(
		&self,
		url: Url,
		bearer: Option<&str>,
		timeout: Duration,
	) -> Result<HttpReply, TransportError> {
		let mut request = self.0.get(url).timeout(timeout.unsigned_abs());

		if let Some(token) = bearer {
			request = request.bearer_auth(token);
		}

		self.execute(request).await
	}

	async fn execute(&self, request: reqwest::RequestBuilder) -> Result<HttpReply, TransportError> {
		let response = request.send().await?;
		let status = response.status().as_u16();
		let body = response.bytes().await?.to_vec();

		Ok(HttpReply { status, body })
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Status and body captured from one API reply.
#[derive(Clone, Debug)]
pub struct HttpReply {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpReply {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Decodes the body as JSON, reporting the path of the failing field on error.
	pub fn decode<T>(&self) -> Result<T, JsonPathError>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
	}
}
