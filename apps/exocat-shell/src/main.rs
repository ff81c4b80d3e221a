use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = exocat_shell::Args::parse();
	exocat_shell::run(args).await
}
