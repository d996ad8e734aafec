// ABOUTME: Capability trait for the release management service.
// ABOUTME: Implemented by the REST client, the dry-run wrapper, and test fakes.

use async_trait::async_trait;

use super::error::DevOpsError;
use super::models::{
    Approval, ApprovalUpdate, DefinitionFilter, EnvironmentUpdate, Project, Release,
    ReleaseDefinition, ReleaseEnvironment,
};
use crate::types::{ApprovalId, EnvironmentId, ProjectId, ReleaseId};

/// Operations the redeployment core needs from the release service.
#[async_trait]
pub trait ReleaseOps: Send + Sync {
    /// Resolve a project by id or name.
    async fn get_project(&self, project: &ProjectId) -> Result<Project, DevOpsError>;

    /// List release definitions expanded with environments and last release.
    async fn get_release_definitions(
        &self,
        project: &ProjectId,
        filter: &DefinitionFilter,
    ) -> Result<Vec<ReleaseDefinition>, DevOpsError>;

    /// Fetch a release with all of its environment instances.
    async fn get_release(
        &self,
        project: &ProjectId,
        release: ReleaseId,
    ) -> Result<Release, DevOpsError>;

    /// Request a status transition of a release environment.
    async fn update_release_environment(
        &self,
        project: &ProjectId,
        release: ReleaseId,
        environment: EnvironmentId,
        update: &EnvironmentUpdate,
    ) -> Result<ReleaseEnvironment, DevOpsError>;

    /// Fetch a single release environment including its pre-deploy approvals.
    async fn get_release_environment(
        &self,
        project: &ProjectId,
        release: ReleaseId,
        environment: EnvironmentId,
    ) -> Result<ReleaseEnvironment, DevOpsError>;

    /// Resolve an approval gate.
    async fn update_release_approval(
        &self,
        project: &ProjectId,
        approval: ApprovalId,
        update: &ApprovalUpdate,
    ) -> Result<Approval, DevOpsError>;
}

#[async_trait]
impl<T: ReleaseOps + ?Sized> ReleaseOps for std::sync::Arc<T> {
    async fn get_project(&self, project: &ProjectId) -> Result<Project, DevOpsError> {
        (**self).get_project(project).await
    }

    async fn get_release_definitions(
        &self,
        project: &ProjectId,
        filter: &DefinitionFilter,
    ) -> Result<Vec<ReleaseDefinition>, DevOpsError> {
        (**self).get_release_definitions(project, filter).await
    }

    async fn get_release(
        &self,
        project: &ProjectId,
        release: ReleaseId,
    ) -> Result<Release, DevOpsError> {
        (**self).get_release(project, release).await
    }

    async fn update_release_environment(
        &self,
        project: &ProjectId,
        release: ReleaseId,
        environment: EnvironmentId,
        update: &EnvironmentUpdate,
    ) -> Result<ReleaseEnvironment, DevOpsError> {
        (**self)
            .update_release_environment(project, release, environment, update)
            .await
    }

    async fn get_release_environment(
        &self,
        project: &ProjectId,
        release: ReleaseId,
        environment: EnvironmentId,
    ) -> Result<ReleaseEnvironment, DevOpsError> {
        (**self)
            .get_release_environment(project, release, environment)
            .await
    }

    async fn update_release_approval(
        &self,
        project: &ProjectId,
        approval: ApprovalId,
        update: &ApprovalUpdate,
    ) -> Result<Approval, DevOpsError> {
        (**self)
            .update_release_approval(project, approval, update)
            .await
    }
}
