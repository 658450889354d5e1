use clap::Parser;
use item_store::cli::{Cli, execute_command};
use item_store::config::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = execute_command(cli).await {
        tracing::error!("Fatal: {}", e);
        std::process::exit(1);
    }
}
