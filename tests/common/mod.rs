//! Shared fixtures for the HTTPS-mock integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use oilfox_client::{
	client::OilFoxClient,
	config::ClientConfig,
	http::ReqwestHttpClient,
	reqwest::Client as ReqwestClient,
	session::HwId,
	url::Url,
};

pub const EMAIL: &str = "tank@example.com";
pub const PASSWORD: &str = "correct-horse";
pub const HWID: &str = "OX100000";

/// Builds a reqwest client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn insecure_http_client() -> ReqwestHttpClient {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

pub fn hwid() -> HwId {
	HwId::new(HWID).expect("Hwid fixture should be valid.")
}

/// Mock-server base URL with the same path shape as the production API.
pub fn mock_base_url(server: &MockServer) -> Url {
	Url::parse(&format!("https://{}/customer-api/v1/", server.address()))
		.expect("Mock base URL should parse successfully.")
}

pub fn build_test_config(server: &MockServer) -> ClientConfig {
	ClientConfig::builder(EMAIL, PASSWORD, hwid())
		.base_url(mock_base_url(server))
		.build()
		.expect("Test configuration should build successfully.")
}

pub fn build_test_client(server: &MockServer) -> OilFoxClient {
	OilFoxClient::with_http_client(build_test_config(server), insecure_http_client())
}

/// Token-endpoint reply body shared by the login and refresh mocks.
pub fn token_body(access: &str, refresh: &str) -> String {
	format!("{{\"access_token\":\"{access}\",\"refresh_token\":\"{refresh}\"}}")
}

/// Minimal healthy snapshot for the configured test device.
pub fn device_body(fill_level_quantity: f64) -> String {
	format!(
		"{{\"hwid\":\"{HWID}\",\"fillLevelPercent\":75.0,\"fillLevelQuantity\":{fill_level_quantity},\
		\"daysReach\":120,\"batteryLevel\":\"GOOD\",\"quantityUnit\":\"L\",\
		\"currentMeteringAt\":\"2025-06-01T05:30:00Z\"}}"
	)
}
