// ABOUTME: Release management service access: models, capability trait, and clients.
// ABOUTME: Exposes the REST client and the dry-run wrapper behind the ReleaseOps trait.

mod client;
mod dry_run;
mod error;
mod models;
mod traits;

pub use client::{AzureDevOpsClient, release_url_for};
pub use dry_run::DryRun;
pub use error::DevOpsError;
pub use models::{
    Approval, ApprovalUpdate, DefinitionEnvironment, DefinitionFilter, EnvironmentUpdate,
    ListResponse, Project, ProjectReference, Release, ReleaseDefinition, ReleaseEnvironment,
    ReleaseReference,
};
pub use traits::ReleaseOps;
