//! Lists every device registered to a real OilFox account.
//!
//! Reads `OILFOX_EMAIL` and `OILFOX_PASSWORD` from the environment and talks to the
//! production API.

// std
use std::env;
// crates.io
use color_eyre::Result;
// self
use oilfox_client::{client::OilFoxClient, config::ClientConfig, session::HwId};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let email = env::var("OILFOX_EMAIL")?;
	let password = env::var("OILFOX_PASSWORD")?;
	// The builder wants the device under poll; inventory discovery is how you find it.
	let config = ClientConfig::builder(email, password, HwId::new("PENDING")?).build()?;
	let client = OilFoxClient::new(config)?;
	let session = client.authenticate().await?;
	let inventory = client.devices(&session).await?;

	println!("{} device(s) registered:", inventory.items.len());

	for state in &inventory.items {
		println!(
			"  {} fill={}% battery={} validation={}",
			state.hwid,
			state.fill_level_percent.map_or("?".to_owned(), |percent| percent.to_string()),
			state
				.battery_level
				.map_or("?", |level| level.code()),
			state.validation_display(),
		);
	}

	Ok(())
}
