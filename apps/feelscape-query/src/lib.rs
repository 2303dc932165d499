pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = feelscape_cli::VERSION,
	rename_all = "kebab",
	styles = feelscape_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	dotenvy::dotenv().ok();

	let config = feelscape_config::load(&args.config)?;

	init_tracing(&config);

	let addr: SocketAddr = config.service.query_bind.parse()?;
	let state = AppState::new(&config)?;
	let app = routes::router(state);
	let listener = TcpListener::bind(addr).await?;

	tracing::info!(%addr, upstream = %config.analysis.endpoint(), "Query relay listening.");

	axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

	tracing::info!("Query relay stopped.");

	Ok(())
}

fn init_tracing(config: &feelscape_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %err, "Failed to listen for Ctrl-C.");

		std::future::pending::<()>().await;
	}

	tracing::info!("Received Ctrl-C, shutting down.");
}
