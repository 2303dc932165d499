use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = feelscape_snapshot::Args::parse();

	feelscape_snapshot::run(args).await
}
