use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = feelscape_query::Args::parse();

	feelscape_query::run(args).await
}
