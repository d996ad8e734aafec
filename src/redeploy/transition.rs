// ABOUTME: Status transitions of a single release environment using the type state pattern.
// ABOUTME: Located -> Settled (cancel if active) -> Started -> Approved, each consuming self.

use std::time::Duration;

use crate::devops::{EnvironmentUpdate, ProjectReference, ReleaseEnvironment, ReleaseOps};
use crate::metrics::DeploymentKey;
use crate::types::{ApprovalId, ApprovalStatus, EnvironmentStatus, ProjectId, ReleaseId};

use super::approve::approve_pending;
use super::error::TransitionError;
use super::observer::{DeploymentEvent, DeploymentObserver};
use super::state::{Approved, Located, Settled, Started};

/// Comment attached to the cancel transition.
pub const CANCEL_COMMENT: &str = "deployment canceled by redeploy-operator";

/// Comment attached to the (re)deploy transition.
pub const TRIGGER_COMMENT: &str = "deployment triggered by redeploy-operator";

/// The environment of a release a transition acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTarget {
    pub project: ProjectReference,
    /// Human-readable definition name (see `build_definition_name`).
    pub definition_name: String,
    pub release: ReleaseId,
    pub environment: String,
}

impl TransitionTarget {
    /// Project identifier used for API calls.
    pub fn project_id(&self) -> ProjectId {
        ProjectId::new(self.project.id.clone())
    }

    pub fn metrics_key(&self) -> DeploymentKey {
        DeploymentKey::new(
            self.project.id.clone(),
            self.project.name.clone(),
            self.definition_name.clone(),
            self.environment.clone(),
        )
    }
}

/// Requested status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    pub status: EnvironmentStatus,
    pub comment: String,
    pub auto_approve: bool,
}

impl TransitionRequest {
    /// Start a (re)deployment.
    pub fn redeploy(auto_approve: bool) -> Self {
        Self {
            status: EnvironmentStatus::InProgress,
            comment: TRIGGER_COMMENT.to_string(),
            auto_approve,
        }
    }
}

/// Result of a completed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub release: ReleaseId,
    pub release_name: String,
    pub environment: String,
    pub status: EnvironmentStatus,
    /// A queued or running deployment was canceled first.
    pub canceled: bool,
    /// Approvals resolved by auto-approval.
    pub approvals: Vec<(ApprovalId, ApprovalStatus)>,
}

/// A transition in progress, parameterized by its current state.
#[derive(Debug)]
pub struct Redeployment<S> {
    target: TransitionTarget,
    environment: ReleaseEnvironment,
    state: S,
}

impl<S> Redeployment<S> {
    pub fn target(&self) -> &TransitionTarget {
        &self.target
    }

    /// The environment instance as last observed.
    pub fn environment(&self) -> &ReleaseEnvironment {
        &self.environment
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    fn into_state<T>(self, state: T) -> Redeployment<T> {
        Redeployment {
            target: self.target,
            environment: self.environment,
            state,
        }
    }

    async fn update<C: ReleaseOps + ?Sized>(
        &self,
        client: &C,
        status: EnvironmentStatus,
        comment: &str,
    ) -> Result<ReleaseEnvironment, crate::devops::DevOpsError> {
        tracing::info!(
            "update release environment deployment of [{}]{}/{}: status -> {}",
            self.target.project.name,
            self.environment.release_name(),
            self.environment.name,
            status
        );
        client
            .update_release_environment(
                &self.target.project_id(),
                self.environment.release_id,
                self.environment.id,
                &EnvironmentUpdate::new(status, comment),
            )
            .await
    }
}

// =============================================================================
// Located
// =============================================================================

impl Redeployment<Located> {
    /// Fetch the live release and find the target environment in it.
    ///
    /// Returns `None` when the release has no environment of that name.
    pub async fn locate<C: ReleaseOps + ?Sized>(
        client: &C,
        target: TransitionTarget,
    ) -> Result<Option<Self>, TransitionError> {
        let release = client
            .get_release(&target.project_id(), target.release)
            .await
            .map_err(|source| TransitionError::FetchRelease {
                release: target.release,
                source,
            })?;

        let Some(environment) = release.environment(&target.environment).cloned() else {
            return Ok(None);
        };

        Ok(Some(Redeployment {
            target,
            environment,
            state: Located,
        }))
    }

    /// Cancel a queued or running deployment and wait for the cancel to settle.
    ///
    /// Idle environments are passed through without any call or delay.
    pub async fn settle<C: ReleaseOps + ?Sized>(
        self,
        client: &C,
        settle_delay: Duration,
    ) -> Result<Redeployment<Settled>, TransitionError> {
        if !self.environment.status.is_active() {
            return Ok(self.into_state(Settled::new(false)));
        }

        self.update(client, EnvironmentStatus::Canceled, CANCEL_COMMENT)
            .await
            .map_err(|source| TransitionError::Cancel {
                environment: self.environment.name.clone(),
                source,
            })?;

        if !settle_delay.is_zero() {
            tokio::time::sleep(settle_delay).await;
        }

        Ok(self.into_state(Settled::new(true)))
    }
}

// =============================================================================
// Settled -> Started
// =============================================================================

impl Redeployment<Settled> {
    /// Request the new status.
    pub async fn start<C: ReleaseOps + ?Sized>(
        mut self,
        client: &C,
        status: EnvironmentStatus,
        comment: &str,
    ) -> Result<Redeployment<Started>, TransitionError> {
        let updated = self.update(client, status, comment).await.map_err(|source| {
            TransitionError::Update {
                environment: self.environment.name.clone(),
                status,
                source,
            }
        })?;

        self.environment.status = updated.status;
        let canceled = self.state.canceled();
        Ok(self.into_state(Started::new(canceled, status)))
    }
}

// =============================================================================
// Started -> Approved
// =============================================================================

impl Redeployment<Started> {
    /// Wait for the start to settle, re-fetch the environment, and approve
    /// every pending pre-deployment approval.
    pub async fn approve_pending<C: ReleaseOps + ?Sized>(
        self,
        client: &C,
        settle_delay: Duration,
    ) -> Result<Redeployment<Approved>, TransitionError> {
        if !settle_delay.is_zero() {
            tokio::time::sleep(settle_delay).await;
        }

        let project = self.target.project_id();
        let refreshed = client
            .get_release_environment(&project, self.environment.release_id, self.environment.id)
            .await
            .map_err(|source| TransitionError::FetchApprovals {
                environment: self.environment.name.clone(),
                source,
            })?;

        let approvals = approve_pending(client, &project, &refreshed.pre_deploy_approvals).await?;
        let started = self.state;
        Ok(self.into_state(Approved::new(started, approvals)))
    }

    pub fn finish(self) -> TransitionOutcome {
        TransitionOutcome {
            release: self.target.release,
            release_name: self.environment.release_name(),
            environment: self.environment.name,
            status: self.state.status(),
            canceled: self.state.canceled(),
            approvals: Vec::new(),
        }
    }
}

// =============================================================================
// Approved - Terminal State
// =============================================================================

impl Redeployment<Approved> {
    pub fn finish(self) -> TransitionOutcome {
        let started = *self.state.started();
        TransitionOutcome {
            release: self.target.release,
            release_name: self.environment.release_name(),
            environment: self.environment.name,
            status: started.status(),
            canceled: started.canceled(),
            approvals: self.state.approvals().to_vec(),
        }
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Runs a full transition: locate, settle, start, observe, approve.
pub struct EnvironmentStatusTransitioner<'a, C: ?Sized> {
    client: &'a C,
    observer: &'a DeploymentObserver,
    settle_delay: Duration,
}

impl<'a, C: ReleaseOps + ?Sized> EnvironmentStatusTransitioner<'a, C> {
    pub fn new(client: &'a C, observer: &'a DeploymentObserver, settle_delay: Duration) -> Self {
        Self {
            client,
            observer,
            settle_delay,
        }
    }

    /// Transition `target` to the requested status.
    ///
    /// Returns `None` when the release has no environment named like the target.
    /// Any remote failure aborts immediately; metrics already recorded for a
    /// started deployment stay recorded.
    pub async fn transition(
        &self,
        target: TransitionTarget,
        request: &TransitionRequest,
    ) -> Result<Option<TransitionOutcome>, TransitionError> {
        let Some(located) = Redeployment::locate(self.client, target).await? else {
            return Ok(None);
        };

        let settled = located.settle(self.client, self.settle_delay).await?;
        let started = settled
            .start(self.client, request.status, &request.comment)
            .await?;

        if request.status == EnvironmentStatus::InProgress {
            let event = DeploymentEvent {
                project_name: started.target.project.name.clone(),
                definition_name: started.target.definition_name.clone(),
                release_name: started.environment.release_name(),
                environment_name: started.environment.name.clone(),
            };
            self.observer
                .deployment_started(&started.target.metrics_key(), &event)
                .await;
        }

        if !request.auto_approve {
            return Ok(Some(started.finish()));
        }

        let approved = started
            .approve_pending(self.client, self.settle_delay)
            .await?;
        Ok(Some(approved.finish()))
    }
}
