use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = exocat_api::Args::parse();
	exocat_api::run(args).await
}
