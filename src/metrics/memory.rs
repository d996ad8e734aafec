// ABOUTME: In-process metrics sink keeping the latest values per deployment key.
// ABOUTME: Used by tests and for inspecting what a cycle recorded.

use parking_lot::Mutex;
use std::collections::HashMap;

use super::{DeploymentKey, DeploymentStatus, MetricsSink};

/// Recorded values for one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricValues {
    pub deployments: u64,
    pub status: Option<i64>,
    pub deployment_time: Option<i64>,
}

#[derive(Debug, Default)]
pub struct MemoryMetrics {
    values: Mutex<HashMap<DeploymentKey, MetricValues>>,
}

impl MemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values recorded for `key`, if anything was recorded.
    pub fn get(&self, key: &DeploymentKey) -> Option<MetricValues> {
        self.values.lock().get(key).copied()
    }

    /// Status gauge for `key`.
    pub fn status(&self, key: &DeploymentKey) -> Option<i64> {
        self.get(key).and_then(|v| v.status)
    }

    /// Deployment counter for `key` (zero when never incremented).
    pub fn deployments(&self, key: &DeploymentKey) -> u64 {
        self.get(key).map(|v| v.deployments).unwrap_or(0)
    }

    /// Snapshot of every key.
    pub fn snapshot(&self) -> HashMap<DeploymentKey, MetricValues> {
        self.values.lock().clone()
    }
}

impl MetricsSink for MemoryMetrics {
    fn inc_deployments(&self, key: &DeploymentKey) {
        self.values.lock().entry(key.clone()).or_default().deployments += 1;
    }

    fn set_status(&self, key: &DeploymentKey, status: DeploymentStatus) {
        self.values.lock().entry(key.clone()).or_default().status = Some(status.value());
    }

    fn set_deployment_time(&self, key: &DeploymentKey, epoch_secs: i64) {
        self.values
            .lock()
            .entry(key.clone())
            .or_default()
            .deployment_time = Some(epoch_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_tracked_independently() {
        let metrics = MemoryMetrics::new();
        let prod = DeploymentKey::new("p", "P", "Rel", "Prod");
        let stage = DeploymentKey::new("p", "P", "Rel", "Stage");

        metrics.set_status(&prod, DeploymentStatus::NotDeployed);
        metrics.set_status(&stage, DeploymentStatus::NotDeployed);
        metrics.inc_deployments(&prod);
        metrics.set_status(&prod, DeploymentStatus::Deployed);

        assert_eq!(metrics.status(&prod), Some(1));
        assert_eq!(metrics.status(&stage), Some(0));
        assert_eq!(metrics.deployments(&prod), 1);
        assert_eq!(metrics.deployments(&stage), 0);
        assert_eq!(metrics.snapshot().len(), 2);
    }
}
