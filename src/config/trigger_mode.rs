// ABOUTME: Trigger mode selecting which release instance gets redeployed.
// ABOUTME: Supports `latest` (newest release of the definition) and `current` (assigned release).

use serde::de::{self, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerMode {
    /// Deploy the definition's most recent release.
    Latest,
    /// Redeploy whatever release is currently assigned to the environment.
    Current,
}

impl FromStr for TriggerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(TriggerMode::Latest),
            "current" => Ok(TriggerMode::Current),
            _ => Err(format!(
                "unknown trigger mode: {} (expected \"latest\" or \"current\")",
                s
            )),
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerMode::Latest => write!(f, "latest"),
            TriggerMode::Current => write!(f, "current"),
        }
    }
}

impl<'de> Deserialize<'de> for TriggerMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
