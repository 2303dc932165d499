//! Headless map client: loads both relays into an in-memory scene and prints it as JSON.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use feelscape_map::{MapSettings, MoodMap, RelayClient, SceneBackend, SearchState};

#[derive(Debug, Parser)]
#[command(
	version = feelscape_cli::VERSION,
	rename_all = "kebab",
	styles = feelscape_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Text to submit to the query relay after the base layer is drawn.
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: Option<String>,
	/// Heatmap radius applied to every layer; clamped to the configured range.
	#[arg(long, value_name = "PX")]
	pub radius: Option<u32>,
	#[arg(long)]
	pub hide_base: bool,
}

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
	pub state: &'a SearchState,
	pub radius: u32,
	pub base_visible: bool,
	pub scene: &'a SceneBackend,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	dotenvy::dotenv().ok();

	let config = feelscape_config::load(&args.config)?;

	init_tracing(&config);

	let relay = RelayClient::new(&config.client)?;
	let map = render(&relay, MapSettings::from_config(&config.client), &args).await?;
	let json = serde_json::to_string_pretty(&snapshot(&map))?;

	println!("{json}");

	Ok(())
}

/// Drives a fresh map through the interactions requested on the command line.
pub async fn render(
	relay: &RelayClient,
	settings: MapSettings,
	args: &Args,
) -> color_eyre::Result<MoodMap<SceneBackend>> {
	let mut map = MoodMap::new(SceneBackend::new(), settings)?;
	let drawn = map.load_from(relay).await?;

	tracing::info!(drawn, "Base layer loaded.");

	if let Some(radius) = args.radius {
		let applied = map.set_radius(radius);

		tracing::debug!(requested = radius, applied, "Radius set.");
	}
	if args.hide_base && map.toggle_base().is_none() {
		tracing::warn!("No base layer to hide.");
	}
	if let Some(query) = &args.query {
		map.search(relay, query).await?;
	}

	Ok(map)
}

pub fn snapshot(map: &MoodMap<SceneBackend>) -> Snapshot<'_> {
	Snapshot {
		state: map.state(),
		radius: map.radius(),
		base_visible: map.base_visible(),
		scene: map.backend(),
	}
}

fn init_tracing(config: &feelscape_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
