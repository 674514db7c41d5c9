//! Climate API - Main Entry Point

use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    init_logging(&settings)?;

    info!("=== Climate API v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Serving dataset {}", settings.database_url);

    run_server(settings).await?;

    Ok(())
}
