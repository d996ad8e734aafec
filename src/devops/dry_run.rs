// ABOUTME: Dry-run wrapper that turns mutating release service calls into logged no-ops.
// ABOUTME: Reads pass through so the decision logic runs against live state.

use async_trait::async_trait;

use super::error::DevOpsError;
use super::models::{
    Approval, ApprovalUpdate, DefinitionFilter, EnvironmentUpdate, Project, Release,
    ReleaseDefinition, ReleaseEnvironment,
};
use super::traits::ReleaseOps;
use crate::types::{ApprovalId, EnvironmentId, ProjectId, ReleaseId};

/// Wraps a release service and suppresses every write.
#[derive(Debug, Clone)]
pub struct DryRun<C> {
    inner: C,
}

impl<C> DryRun<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

#[async_trait]
impl<C: ReleaseOps> ReleaseOps for DryRun<C> {
    async fn get_project(&self, project: &ProjectId) -> Result<Project, DevOpsError> {
        self.inner.get_project(project).await
    }

    async fn get_release_definitions(
        &self,
        project: &ProjectId,
        filter: &DefinitionFilter,
    ) -> Result<Vec<ReleaseDefinition>, DevOpsError> {
        self.inner.get_release_definitions(project, filter).await
    }

    async fn get_release(
        &self,
        project: &ProjectId,
        release: ReleaseId,
    ) -> Result<Release, DevOpsError> {
        self.inner.get_release(project, release).await
    }

    async fn update_release_environment(
        &self,
        project: &ProjectId,
        release: ReleaseId,
        environment: EnvironmentId,
        update: &EnvironmentUpdate,
    ) -> Result<ReleaseEnvironment, DevOpsError> {
        tracing::info!(
            %project,
            release_id = %release,
            environment_id = %environment,
            status = %update.status,
            "dry run: skipping release environment update"
        );
        let mut current = self
            .inner
            .get_release_environment(project, release, environment)
            .await?;
        current.status = update.status;
        Ok(current)
    }

    async fn get_release_environment(
        &self,
        project: &ProjectId,
        release: ReleaseId,
        environment: EnvironmentId,
    ) -> Result<ReleaseEnvironment, DevOpsError> {
        self.inner
            .get_release_environment(project, release, environment)
            .await
    }

    async fn update_release_approval(
        &self,
        project: &ProjectId,
        approval: ApprovalId,
        update: &ApprovalUpdate,
    ) -> Result<Approval, DevOpsError> {
        tracing::info!(
            %project,
            approval_id = %approval,
            status = %update.status,
            "dry run: skipping approval update"
        );
        Ok(Approval {
            id: approval,
            status: update.status,
        })
    }
}
