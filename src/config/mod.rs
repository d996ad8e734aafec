// ABOUTME: Configuration types and parsing for the operator's YAML file.
// ABOUTME: Handles env var interpolation, trigger blocks, and definition filters.

mod deserialize;
mod interpolate;
mod trigger_mode;

pub use interpolate::{interpolate, interpolate_with};
pub use trigger_mode::TriggerMode;

use crate::devops::DefinitionFilter;
use crate::error::{Error, Result};
use crate::schedule::Crontab;
use crate::types::ProjectId;
use deserialize::{deserialize_environments, deserialize_project};
use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Delay between a cancel and the following restart, and between a restart and
/// the approval check. The service processes status changes asynchronously.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_settle_delay", with = "humantime_serde")]
    pub settle_delay: Duration,

    #[serde(default)]
    pub releases: Vec<ReleaseTrigger>,
}

/// One scheduled redeployment policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseTrigger {
    pub crontab: Crontab,

    #[serde(deserialize_with = "deserialize_project")]
    pub project: ProjectId,

    /// Target environment names, in processing order.
    #[serde(deserialize_with = "deserialize_environments")]
    pub environments: NonEmpty<String>,

    pub trigger: TriggerMode,

    #[serde(default)]
    pub auto_approve: bool,

    #[serde(default)]
    pub release_definitions: DefinitionFilter,
}

impl ReleaseTrigger {
    /// Whether `name` is one of the configured target environments.
    pub fn targets(&self, name: &str) -> bool {
        self.environments.iter().any(|env| env == name)
    }
}

fn default_settle_delay() -> Duration {
    DEFAULT_SETTLE_DELAY
}

impl Default for Config {
    fn default() -> Self {
        Config {
            settle_delay: DEFAULT_SETTLE_DELAY,
            releases: Vec::new(),
        }
    }
}

impl Config {
    /// Parse YAML without interpolation.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    /// Read a config file, expand `${VAR}` references, and parse it.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        tracing::info!("reading configuration from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let expanded = interpolate(&raw)?;
        let config = Self::from_yaml(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that need the whole document.
    pub fn validate(&self) -> Result<()> {
        if self.releases.is_empty() {
            return Err(Error::NoTriggers);
        }
        Ok(())
    }
}
