// ABOUTME: Records deployment metrics and sends a notification for every started deployment.
// ABOUTME: Owns the injected metrics sink and the notification dispatcher.

use std::sync::Arc;

use crate::metrics::{DeploymentKey, DeploymentStatus, MetricsSink};
use crate::notify::Notifications;

/// What was deployed where; the input of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentEvent {
    pub project_name: String,
    pub definition_name: String,
    pub release_name: String,
    pub environment_name: String,
}

impl DeploymentEvent {
    /// Message substituted into the notification template.
    pub fn message(&self) -> String {
        format!(
            "starting deployment of [{}]{} :: {} -> {}",
            self.project_name, self.definition_name, self.release_name, self.environment_name
        )
    }
}

#[derive(Clone)]
pub struct DeploymentObserver {
    metrics: Arc<dyn MetricsSink>,
    notifications: Notifications,
}

impl DeploymentObserver {
    pub fn new(metrics: Arc<dyn MetricsSink>, notifications: Notifications) -> Self {
        Self {
            metrics,
            notifications,
        }
    }

    /// Mark `key` as not deployed before a cycle touches it.
    pub fn reset(&self, key: &DeploymentKey) {
        self.metrics.set_status(key, DeploymentStatus::NotDeployed);
    }

    /// Record a successfully started deployment and notify.
    ///
    /// Returns the number of endpoints that accepted the notification.
    pub async fn deployment_started(&self, key: &DeploymentKey, event: &DeploymentEvent) -> usize {
        self.metrics.inc_deployments(key);
        self.metrics
            .set_deployment_time(key, chrono::Utc::now().timestamp());
        self.metrics.set_status(key, DeploymentStatus::Deployed);

        self.notifications.dispatch(&event.message()).await
    }
}
