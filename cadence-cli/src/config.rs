//! Global cadence configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

static DEFAULT_DATA_PATH: &str = "~/.cadence/events";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

/// Global configuration at ~/.config/cadence/config.toml
///
/// Every setting can also come from the environment with a `CADENCE_`
/// prefix (e.g. `CADENCE_DATA_DIR`).
#[derive(Deserialize, Clone)]
pub struct CadenceConfig {
    #[serde(default = "default_data_path")]
    pub data_dir: PathBuf,

    /// Reminder lead time, in minutes, applied to new events when the
    /// user does not pass one.
    #[serde(default)]
    pub default_notification_time: Option<u32>,
}

/// Loaded configuration plus path helpers.
#[derive(Clone)]
pub struct Cadence {
    config: CadenceConfig,
}

impl Cadence {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: CadenceConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("CADENCE"))
            .build()
            .context("Could not read configuration")?
            .try_deserialize()
            .context("Could not parse configuration")?;

        Ok(Cadence { config })
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("cadence");

        Ok(config_dir.join("config.toml"))
    }

    /// Where event files live, with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn default_notification_time(&self) -> u32 {
        self.config.default_notification_time.unwrap_or(10)
    }

    /// Create a default config file with all options commented out.
    fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# cadence configuration

# Where your event files live:
# data_dir = \"{}\"

# Reminder lead time for new events, in minutes:
# default_notification_time = 10
",
            DEFAULT_DATA_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write {}", path.display()))?;

        Ok(())
    }
}
