use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = feelscape_records::Args::parse();

	feelscape_records::run(args).await
}
