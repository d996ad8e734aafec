// ABOUTME: Runs one redeployment cycle per trigger firing.
// ABOUTME: Definition lookup, then the per-definition driver, then a cycle summary.

use std::time::Duration;

use tracing::Instrument;

use crate::config::ReleaseTrigger;
use crate::devops::ReleaseOps;

use super::driver::EnvironmentDeploymentDriver;
use super::error::LookupError;
use super::locator::locate_definitions;
use super::observer::DeploymentObserver;
use super::report::CycleReport;
use super::transition::EnvironmentStatusTransitioner;

/// Shared by every trigger task.
pub struct RedeploymentOrchestrator<C> {
    client: C,
    observer: DeploymentObserver,
    settle_delay: Duration,
}

impl<C: ReleaseOps> RedeploymentOrchestrator<C> {
    pub fn new(client: C, observer: DeploymentObserver, settle_delay: Duration) -> Self {
        Self {
            client,
            observer,
            settle_delay,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run one cycle for `trigger`.
    ///
    /// Only a failed definition lookup is an error; per-environment failures
    /// are collected in the report.
    pub async fn run_trigger(&self, trigger: &ReleaseTrigger) -> Result<CycleReport, LookupError> {
        let definitions = locate_definitions(
            &self.client,
            &trigger.project,
            &trigger.release_definitions,
        )
        .await?;

        let mut report = CycleReport {
            definitions: definitions.len(),
            ..CycleReport::default()
        };

        let driver = EnvironmentDeploymentDriver::new(
            EnvironmentStatusTransitioner::new(&self.client, &self.observer, self.settle_delay),
            &self.observer,
        );
        for definition in &definitions {
            tracing::debug!(
                release_definition = %definition.display_name(),
                "release definition matched"
            );
            driver.deploy_definition(trigger, definition, &mut report).await;
        }

        report.log_summary();
        Ok(report)
    }

    /// Scheduler callback: run a cycle and log instead of failing.
    pub async fn fire(&self, trigger: &ReleaseTrigger) {
        let span = tracing::info_span!(
            "cycle",
            project = %trigger.project,
            crontab = %trigger.crontab
        );
        async {
            tracing::info!("trigger fired");
            if let Err(e) = self.run_trigger(trigger).await {
                tracing::error!("cycle aborted: {}", e);
            }
        }
        .instrument(span)
        .await
    }
}
