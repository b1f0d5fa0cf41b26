//! FleetGuard
//!
//! Headless driver for the battery risk monitor: loads configuration,
//! synthesizes a fleet, scans it on a fixed cadence and logs incidents.

mod settings;

pub use settings::{AppConfig, LoggingConfig, MonitorConfig, CONFIG_PATH_ENV, ENV_PREFIX};

use anyhow::Context;
use chrono::Utc;
use fleet_monitor::{FleetController, FleetStats, ScanTask};
use fleet_sim::FleetSynthesizer;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let level = config.max_level()?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
    .context("failed to set tracing subscriber")
}

/// Run a monitoring session until `run_for_secs` elapses or Ctrl-C.
///
/// Returns the fleet statistics at shutdown.
pub async fn run(config: AppConfig) -> anyhow::Result<FleetStats> {
    config.validate()?;

    let mut synthesizer = FleetSynthesizer::new(config.fleet.clone(), config.thresholds.clone())?;
    let controller =
        FleetController::from_synthesizer(&mut synthesizer, config.thresholds.clone(), Utc::now())?
            .into_shared();

    let task = ScanTask::start(controller.clone(), config.monitor.scan_interval());

    match config.monitor.run_for() {
        Some(duration) => {
            info!("Monitoring for {:?}", duration);
            tokio::select! {
                _ = tokio::time::sleep(duration) => {}
                signal = tokio::signal::ctrl_c() => signal.context("failed to listen for Ctrl-C")?,
            }
        }
        None => {
            info!("Monitoring until Ctrl-C");
            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for Ctrl-C")?;
        }
    }

    let passes = task.cancel().await?;

    let controller = controller.read().await;
    let stats = controller.stats();
    info!(
        "Session finished after {} scan passes: {}",
        passes,
        serde_json::to_string(&stats)?
    );
    for incident in controller.incidents().open_incidents() {
        debug!("Open incident: {}", serde_json::to_string(incident)?);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_run_for_fixed_duration() {
        let mut config = AppConfig::default();
        config.fleet.fleet_size = 40;
        config.fleet.seed = Some(17);
        config.fleet.hot_ratio = 0.5;
        config.monitor.run_for_secs = Some(120);

        let stats = run(config).await.unwrap();

        assert_eq!(stats.total_vehicles, 40);
        assert_eq!(stats.incidents.total(), stats.emergency_vehicles);
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.fleet.fleet_size = 0;
        assert!(run(config).await.is_err());
    }
}
