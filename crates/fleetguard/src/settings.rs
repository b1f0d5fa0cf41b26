//! Application configuration

use anyhow::{bail, Context};
use config::{Config, Environment, File};
use fleet_sim::SynthConfig;
use risk_classifier::RiskThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::Level;

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "FLEETGUARD";

/// Environment variable naming a config file
pub const CONFIG_PATH_ENV: &str = "FLEETGUARD_CONFIG";

/// Scan loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between scan passes
    pub scan_interval_secs: u64,
    /// Stop after this many seconds; `None` runs until Ctrl-C
    pub run_for_secs: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: 30,
            run_for_secs: None,
        }
    }
}

impl MonitorConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    pub fn run_for(&self) -> Option<Duration> {
        self.run_for_secs.map(Duration::from_secs)
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> anyhow::Result<Level> {
        self.level
            .parse::<Level>()
            .with_context(|| format!("invalid log level {:?}", self.level))
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub monitor: MonitorConfig,
    pub fleet: SynthConfig,
    pub thresholds: RiskThresholds,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration: built-in defaults, then the optional file, then
    /// `FLEETGUARD__*` environment variables.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.monitor.scan_interval_secs == 0 {
            bail!("monitor.scan_interval_secs must be positive");
        }
        self.fleet.validate().context("invalid [fleet] section")?;
        self.thresholds
            .validate()
            .context("invalid [thresholds] section")?;
        self.logging.max_level()?;
        Ok(())
    }
}
