// ABOUTME: Scheduled redeployment of release environments.
// ABOUTME: Lookup, per-environment driver, type state transitions, approvals, and observation.

mod approve;
mod driver;
mod error;
mod locator;
mod name;
mod observer;
mod orchestrator;
mod report;
mod state;
mod transition;

pub use approve::{AUTO_APPROVAL_COMMENT, approve_pending, pending_approvals};
pub use driver::{EnvironmentDeploymentDriver, resolve_release};
pub use error::{ApprovalError, LookupError, TransitionError, TransitionErrorKind};
pub use locator::locate_definitions;
pub use name::build_definition_name;
pub use observer::{DeploymentEvent, DeploymentObserver};
pub use orchestrator::RedeploymentOrchestrator;
pub use report::{CycleReport, EnvironmentFailure};
pub use state::{Approved, Located, Settled, Started};
pub use transition::{
    CANCEL_COMMENT, EnvironmentStatusTransitioner, Redeployment, TransitionOutcome,
    TransitionRequest, TransitionTarget, TRIGGER_COMMENT,
};
