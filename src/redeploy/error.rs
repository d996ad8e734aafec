// ABOUTME: Error types for redeployment cycles.
// ABOUTME: Covers definition lookup, status transitions, and approval updates.

use crate::devops::DevOpsError;
use crate::types::{ApprovalId, EnvironmentStatus, ProjectId, ReleaseId};

/// Project or release definition resolution failed; the trigger's cycle is aborted.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The configured project could not be resolved.
    #[error("unable to resolve project {project}: {source}")]
    Project {
        project: ProjectId,
        source: DevOpsError,
    },

    /// Listing release definitions failed.
    #[error("unable to list release definitions of project {project}: {source}")]
    Definitions {
        project: ProjectId,
        source: DevOpsError,
    },
}

/// Updating an approval gate failed.
#[derive(Debug, thiserror::Error)]
#[error("unable to approve approval {approval}: {source}")]
pub struct ApprovalError {
    pub approval: ApprovalId,
    pub source: DevOpsError,
}

/// A per-environment transition failed; sibling environments are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    /// The release could not be fetched.
    #[error("unable to fetch release {release}: {source}")]
    FetchRelease {
        release: ReleaseId,
        source: DevOpsError,
    },

    /// Canceling the running deployment failed.
    #[error("unable to cancel deployment of {environment}: {source}")]
    Cancel {
        environment: String,
        source: DevOpsError,
    },

    /// The requested status update failed.
    #[error("unable to set {environment} to {status}: {source}")]
    Update {
        environment: String,
        status: EnvironmentStatus,
        source: DevOpsError,
    },

    /// Re-fetching the environment for the approval check failed.
    #[error("unable to fetch approvals of {environment}: {source}")]
    FetchApprovals {
        environment: String,
        source: DevOpsError,
    },

    /// Auto-approval failed after the deployment was started.
    #[error(transparent)]
    Approval(#[from] ApprovalError),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionErrorKind {
    FetchRelease,
    Cancel,
    Update,
    FetchApprovals,
    Approval,
}

impl TransitionError {
    pub fn kind(&self) -> TransitionErrorKind {
        match self {
            TransitionError::FetchRelease { .. } => TransitionErrorKind::FetchRelease,
            TransitionError::Cancel { .. } => TransitionErrorKind::Cancel,
            TransitionError::Update { .. } => TransitionErrorKind::Update,
            TransitionError::FetchApprovals { .. } => TransitionErrorKind::FetchApprovals,
            TransitionError::Approval(_) => TransitionErrorKind::Approval,
        }
    }

    /// Whether the deployment was already started when the error occurred.
    ///
    /// Metrics emitted for a started deployment are not retracted.
    pub fn after_start(&self) -> bool {
        matches!(
            self,
            TransitionError::FetchApprovals { .. } | TransitionError::Approval(_)
        )
    }
}
