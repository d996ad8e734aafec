// ABOUTME: Type-safe identifiers and status enums for release management entities.
// ABOUTME: Uses phantom types to prevent mixing release, environment, and approval IDs.

mod id;
mod status;

pub use id::{ApprovalId, DefinitionId, EnvironmentId, Id, ProjectId, ReleaseId};
pub use status::{ApprovalStatus, EnvironmentStatus};
