//! FleetGuard - Main Entry Point

use fleetguard::{init_logging, run, AppConfig, CONFIG_PATH_ENV};
use std::path::PathBuf;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Config file: first argument, else $FLEETGUARD_CONFIG
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

    let config = AppConfig::load(path.as_deref())?;
    init_logging(&config.logging)?;

    info!("=== FleetGuard v{} ===", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &path {
        info!("Loaded configuration from {}", path.display());
    }

    run(config).await?;
    Ok(())
}
