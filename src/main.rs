use clap::Parser;
use composedeck::presentation::cli::{self, Cli};
use composedeck::presentation::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging();

    if let Err(e) = cli::run(cli).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
