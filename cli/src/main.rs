use bookmarky_cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bookmarky_cli::init_tracing();
    bookmarky_cli::run(cli).await
}
