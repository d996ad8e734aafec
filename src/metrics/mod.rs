// ABOUTME: Deployment metrics capability and its implementations.
// ABOUTME: The sink is injected into the observer; no process-wide registry is used.

mod memory;
mod prometheus;

pub use self::memory::{MemoryMetrics, MetricValues};
pub use self::prometheus::{PrometheusMetrics, export_metrics};

/// Label set identifying one deployed environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeploymentKey {
    pub project_id: String,
    pub project_name: String,
    pub release_definition_name: String,
    pub environment_name: String,
}

impl DeploymentKey {
    pub fn new(
        project_id: impl Into<String>,
        project_name: impl Into<String>,
        release_definition_name: impl Into<String>,
        environment_name: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            project_name: project_name.into(),
            release_definition_name: release_definition_name.into(),
            environment_name: environment_name.into(),
        }
    }

    /// Label values in the order of [`LABEL_NAMES`].
    pub fn label_values(&self) -> [&str; 4] {
        [
            &self.project_id,
            &self.project_name,
            &self.release_definition_name,
            &self.environment_name,
        ]
    }
}

/// Label names shared by every deployment instrument.
pub const LABEL_NAMES: [&str; 4] = [
    "projectId",
    "projectName",
    "releaseDefinitionName",
    "environmentName",
];

/// Value of the deployment status gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentStatus {
    /// Not (yet) deployed during the current cycle.
    NotDeployed,
    /// A deployment was started during the current cycle.
    Deployed,
}

impl DeploymentStatus {
    pub fn value(&self) -> i64 {
        match self {
            DeploymentStatus::NotDeployed => 0,
            DeploymentStatus::Deployed => 1,
        }
    }
}

/// Capabilities the observer needs from a metrics backend.
///
/// Writers for different keys never conflict; implementations must be safe to
/// share across concurrently running triggers.
pub trait MetricsSink: Send + Sync {
    /// Increment the deployment counter.
    fn inc_deployments(&self, key: &DeploymentKey);

    /// Set the deployment status gauge.
    fn set_status(&self, key: &DeploymentKey, status: DeploymentStatus);

    /// Set the time-of-last-deployment gauge (epoch seconds).
    fn set_deployment_time(&self, key: &DeploymentKey, epoch_secs: i64);
}

impl<T: MetricsSink + ?Sized> MetricsSink for std::sync::Arc<T> {
    fn inc_deployments(&self, key: &DeploymentKey) {
        (**self).inc_deployments(key)
    }

    fn set_status(&self, key: &DeploymentKey, status: DeploymentStatus) {
        (**self).set_status(key, status)
    }

    fn set_deployment_time(&self, key: &DeploymentKey, epoch_secs: i64) {
        (**self).set_deployment_time(key, epoch_secs)
    }
}
