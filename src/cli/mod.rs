// CLI module: run the service, or the terminal client against it

use clap::{Parser, Subcommand};
use poem::{Server, listener::TcpListener};

use crate::api::build_app;
use crate::app_data::AppData;
use crate::client::run_console;
use crate::config::{ClientSettings, ServerSettings};

/// Item store CLI
#[derive(Parser, Debug)]
#[command(name = "item-store")]
#[command(about = "Item store REST service and terminal client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the REST service (default)
    Serve,

    /// Open the interactive item console
    Client {
        /// Base URL of the API, overrides API_URL
        #[arg(long)]
        api_url: Option<String>,
    },
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler function.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Settings were invalid, the database was unreachable, or the listener failed
pub async fn execute_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::Client { api_url } => {
            let settings = match api_url {
                Some(api_url) => ClientSettings::with_api_url(api_url),
                None => ClientSettings::from_env()?,
            };
            run_console(settings).await?;
            Ok(())
        }
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let settings = ServerSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let allowed_origins = settings.cors_policy().allowed_origins().join(", ");
    let address = settings.server_address();

    // Startup error: no listener is bound if the database is unreachable
    let app_data = AppData::init(settings).await?;
    let app = build_app(&app_data);

    tracing::info!("CORS allowed for origins: {}", allowed_origins);
    tracing::info!("Server running on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
