use dotenvy::dotenv;
use pawmart::{api, config, errors::Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::server::load_default_config()?;
    info!(bind_addr = %app_config.bind_addr, "Loaded application configuration.");

    // 4. Connect and make sure the schema exists
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;

    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema ready."))
        .inspect_err(|e| error!("Failed to create database schema: {e}"))?;

    // 5. Serve the API
    api::serve(&app_config.bind_addr, api::AppState::new(db)).await
}
