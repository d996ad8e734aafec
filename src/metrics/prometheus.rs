// ABOUTME: Prometheus-backed deployment metrics registered on an injected registry.
// ABOUTME: Also renders a registry in the Prometheus text exposition format.

use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

use super::{DeploymentKey, DeploymentStatus, LABEL_NAMES, MetricsSink};

const PREFIX: &str = "azuredevops_deployment_operator";

/// Deployment counter, status gauge and time gauge.
#[derive(Clone)]
pub struct PrometheusMetrics {
    deployment_counter: IntCounterVec,
    deployment_status: IntGaugeVec,
    deployment_time: IntGaugeVec,
}

impl PrometheusMetrics {
    /// Create the instruments and register them on `registry`.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let deployment_counter = IntCounterVec::new(
            Opts::new(
                format!("{}_deployment_counter", PREFIX),
                "Deployment operator: deployments started",
            ),
            &LABEL_NAMES,
        )?;
        registry.register(Box::new(deployment_counter.clone()))?;

        let deployment_status = IntGaugeVec::new(
            Opts::new(
                format!("{}_deployment_status", PREFIX),
                "Deployment operator: last deployment status (1 = started this cycle)",
            ),
            &LABEL_NAMES,
        )?;
        registry.register(Box::new(deployment_status.clone()))?;

        let deployment_time = IntGaugeVec::new(
            Opts::new(
                format!("{}_deployment_time", PREFIX),
                "Deployment operator: last deployment time (epoch seconds)",
            ),
            &LABEL_NAMES,
        )?;
        registry.register(Box::new(deployment_time.clone()))?;

        Ok(Self {
            deployment_counter,
            deployment_status,
            deployment_time,
        })
    }
}

impl MetricsSink for PrometheusMetrics {
    fn inc_deployments(&self, key: &DeploymentKey) {
        self.deployment_counter
            .with_label_values(&key.label_values())
            .inc();
    }

    fn set_status(&self, key: &DeploymentKey, status: DeploymentStatus) {
        self.deployment_status
            .with_label_values(&key.label_values())
            .set(status.value());
    }

    fn set_deployment_time(&self, key: &DeploymentKey, epoch_secs: i64) {
        self.deployment_time
            .with_label_values(&key.label_values())
            .set(epoch_secs);
    }
}

/// Render every metric family of `registry` in the text exposition format.
pub fn export_metrics(registry: &Registry) -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
