//! Demonstrates a full poll cycle against a self-contained mock of the customer API:
//! login, two device fetches, and the derived consumption counter.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use oilfox_client::{
	client::OilFoxClient,
	config::ClientConfig,
	http::ReqwestHttpClient,
	poll::Poller,
	reqwest::Client,
	sensor::{BinarySensorKind, SensorKind},
	session::HwId,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let _login = server
		.mock_async(|when, then| {
			when.method(POST).path("/customer-api/v1/login");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"refresh_token\":\"demo-refresh\"}",
			);
		})
		.await;
	let mut device = server
		.mock_async(|when, then| {
			when.method(GET).path("/customer-api/v1/device/OX42DEMO");
			then.status(200).header("content-type", "application/json").body(
				"{\"hwid\":\"OX42DEMO\",\"fillLevelPercent\":80.0,\"fillLevelQuantity\":1600.0,\
				\"daysReach\":160,\"batteryLevel\":\"GOOD\",\"quantityUnit\":\"L\",\
				\"currentMeteringAt\":\"2025-06-01T05:30:00Z\"}",
			);
		})
		.await;
	let config = ClientConfig::builder("demo@example.com", "demo-password", HwId::new("OX42DEMO")?)
		.base_url(Url::parse(&format!("https://{}/customer-api/v1/", server.address()))?)
		.build()?;
	let http = ReqwestHttpClient::with_client(
		Client::builder().danger_accept_invalid_certs(true).build()?,
	);
	let poller = Poller::new(OilFoxClient::with_http_client(config, http));
	let outcome = poller.tick().await;
	let state = outcome.device.as_ref().expect("First tick should produce a snapshot.");

	println!("Snapshot for {}:", state.hwid);

	for kind in SensorKind::ALL {
		if let Some(value) = kind.value(state, &outcome.usage) {
			println!("  {:<24} {}", kind.display_name(), value);
		}
	}
	for kind in BinarySensorKind::ALL {
		println!("  {:<24} {}", kind.id(), kind.is_on(state));
	}

	// Second measurement with a lower level feeds the consumption counter.
	device.delete_async().await;

	let _drained = server
		.mock_async(|when, then| {
			when.method(GET).path("/customer-api/v1/device/OX42DEMO");
			then.status(200).header("content-type", "application/json").body(
				"{\"hwid\":\"OX42DEMO\",\"fillLevelPercent\":78.0,\"fillLevelQuantity\":1560.0,\
				\"daysReach\":156,\"batteryLevel\":\"GOOD\",\"quantityUnit\":\"L\"}",
			);
		})
		.await;
	let outcome = poller.tick().await;

	println!(
		"Consumed since start: {} L ({} kWh).",
		outcome.usage.liters, outcome.usage.energy_kwh,
	);
	println!(
		"Ticks: {}, successes: {}, relogins: {}.",
		poller.metrics().ticks(),
		poller.metrics().successes(),
		poller.metrics().relogins(),
	);

	Ok(())
}
