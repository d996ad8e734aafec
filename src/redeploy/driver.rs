// ABOUTME: Per-definition driver deciding which environments get redeployed.
// ABOUTME: Resets status gauges, resolves release ids per trigger mode, and runs transitions.

use crate::config::{ReleaseTrigger, TriggerMode};
use crate::devops::{DefinitionEnvironment, ProjectReference, ReleaseDefinition, ReleaseOps};
use crate::diagnostics::ConfigurationWarning;
use crate::metrics::DeploymentKey;
use crate::types::ReleaseId;

use super::observer::DeploymentObserver;
use super::report::{CycleReport, EnvironmentFailure};
use super::transition::{EnvironmentStatusTransitioner, TransitionRequest, TransitionTarget};

pub struct EnvironmentDeploymentDriver<'a, C: ?Sized> {
    transitioner: EnvironmentStatusTransitioner<'a, C>,
    observer: &'a DeploymentObserver,
}

impl<'a, C: ReleaseOps + ?Sized> EnvironmentDeploymentDriver<'a, C> {
    pub fn new(
        transitioner: EnvironmentStatusTransitioner<'a, C>,
        observer: &'a DeploymentObserver,
    ) -> Self {
        Self {
            transitioner,
            observer,
        }
    }

    /// Redeploy the configured environments of one definition.
    ///
    /// Failures are recorded in `report`; they never stop the remaining environments.
    pub async fn deploy_definition(
        &self,
        trigger: &ReleaseTrigger,
        definition: &ReleaseDefinition,
        report: &mut CycleReport,
    ) {
        let definition_name = definition.display_name();
        let project = definition
            .project_reference
            .clone()
            .unwrap_or_else(|| ProjectReference {
                id: trigger.project.to_string(),
                name: trigger.project.to_string(),
            });

        for environment in trigger.environments.iter() {
            self.observer.reset(&DeploymentKey::new(
                project.id.as_str(),
                project.name.as_str(),
                definition_name.as_str(),
                environment.as_str(),
            ));
        }

        let Some(environments) = definition.environments.as_deref() else {
            tracing::info!(release_definition = %definition_name, "definition has no environments");
            return;
        };

        let request = TransitionRequest::redeploy(trigger.auto_approve);
        // Configuration order, not definition order.
        for name in trigger.environments.iter() {
            let Some(environment) = environments.iter().find(|e| e.name == *name) else {
                tracing::debug!(
                    release_definition = %definition_name,
                    environment = %name,
                    "environment not part of definition"
                );
                continue;
            };

            let Some(release) = resolve_release(trigger.trigger, definition, environment) else {
                let warning = match trigger.trigger {
                    TriggerMode::Latest => {
                        ConfigurationWarning::no_latest_release(&definition_name, &environment.name)
                    }
                    TriggerMode::Current => ConfigurationWarning::no_current_release(
                        &definition_name,
                        &environment.name,
                    ),
                };
                report.diagnostics.warn(warning);
                continue;
            };

            tracing::info!(
                release_definition = %definition_name,
                environment = %environment.name,
                release_id = %release,
                "redeploying environment"
            );

            let target = TransitionTarget {
                project: project.clone(),
                definition_name: definition_name.clone(),
                release,
                environment: environment.name.clone(),
            };

            match self.transitioner.transition(target, &request).await {
                Ok(Some(outcome)) => {
                    tracing::info!(
                        release_definition = %definition_name,
                        environment = %environment.name,
                        release_id = %release,
                        canceled = outcome.canceled,
                        approvals = outcome.approvals.len(),
                        "deployment started"
                    );
                    report.deployments.push(outcome);
                }
                Ok(None) => {
                    tracing::debug!(
                        release_definition = %definition_name,
                        environment = %environment.name,
                        release_id = %release,
                        "release has no such environment"
                    );
                }
                Err(error) => {
                    tracing::error!(
                        release_definition = %definition_name,
                        environment = %environment.name,
                        release_id = %release,
                        "redeployment failed: {}",
                        error
                    );
                    report.failures.push(EnvironmentFailure {
                        definition: definition_name.clone(),
                        environment: environment.name.clone(),
                        release,
                        error,
                    });
                }
            }
        }
    }
}

/// Release to redeploy for one environment, per trigger mode.
pub fn resolve_release(
    mode: TriggerMode,
    definition: &ReleaseDefinition,
    environment: &DefinitionEnvironment,
) -> Option<ReleaseId> {
    match mode {
        TriggerMode::Latest => definition
            .last_release
            .as_ref()
            .and_then(|release| release.assigned_id()),
        TriggerMode::Current => environment
            .current_release
            .as_ref()
            .and_then(|release| release.assigned_id()),
    }
}
