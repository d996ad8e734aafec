// ABOUTME: Application-wide error types for redeploy-operator.
// ABOUTME: Only startup can fail fatally; orchestration errors live in redeploy::error.

use std::path::PathBuf;
use thiserror::Error;

use crate::devops::DevOpsError;
use crate::schedule::ScheduleError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no release triggers configured")]
    NoTriggers,

    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("release service client: {0}")]
    DevOps(#[from] DevOpsError),

    #[error("metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("invalid bind address: {0}")]
    InvalidBind(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_names_the_flag() {
        let err = Error::MissingCredential("--azuredevops-access-token");
        assert_eq!(
            err.to_string(),
            "missing credential: --azuredevops-access-token"
        );
    }
}
