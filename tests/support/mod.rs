// ABOUTME: Shared test fakes for the release service and notification delivery.
// ABOUTME: The fake records every call with its (tokio) timestamp for ordering and timing checks.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::time::Instant;

use redeploy_operator::devops::{
    Approval, ApprovalUpdate, DefinitionEnvironment, DefinitionFilter, DevOpsError,
    EnvironmentUpdate, Project, ProjectReference, Release, ReleaseDefinition, ReleaseEnvironment,
    ReleaseOps, ReleaseReference,
};
use redeploy_operator::metrics::{DeploymentKey, MemoryMetrics};
use redeploy_operator::notify::{NotificationError, NotificationTemplate, Notifications, Notifier};
use redeploy_operator::redeploy::DeploymentObserver;
use redeploy_operator::types::{
    ApprovalId, ApprovalStatus, DefinitionId, EnvironmentId, EnvironmentStatus, ProjectId,
    ReleaseId,
};

pub const PROJECT_ID: &str = "p-0001";
pub const PROJECT_NAME: &str = "P";

/// One recorded release service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetProject,
    GetReleaseDefinitions,
    GetRelease(i64),
    UpdateReleaseEnvironment {
        release: i64,
        environment: i64,
        status: EnvironmentStatus,
        comment: String,
    },
    GetReleaseEnvironment {
        release: i64,
        environment: i64,
    },
    UpdateReleaseApproval {
        approval: i64,
        comments: String,
    },
}

#[derive(Default)]
struct FakeState {
    definitions: Vec<ReleaseDefinition>,
    releases: HashMap<i64, Release>,
    fail_project: bool,
    fail_updates: HashSet<i64>,
    fail_approvals: HashSet<i64>,
    calls: Vec<(Call, Instant)>,
}

/// In-memory release service.
#[derive(Default)]
pub struct FakeReleaseService {
    state: Mutex<FakeState>,
}

impl FakeReleaseService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definition(self, definition: ReleaseDefinition) -> Self {
        self.state.lock().definitions.push(definition);
        self
    }

    pub fn with_release(self, release: Release) -> Self {
        self.state.lock().releases.insert(release.id.get(), release);
        self
    }

    pub fn failing_project(self) -> Self {
        self.state.lock().fail_project = true;
        self
    }

    /// Every status update of this environment id fails.
    pub fn failing_update(self, environment: i64) -> Self {
        self.state.lock().fail_updates.insert(environment);
        self
    }

    pub fn failing_approval(self, approval: i64) -> Self {
        self.state.lock().fail_approvals.insert(approval);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Call, Instant)> {
        self.state.lock().calls.clone()
    }

    pub fn updates(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::UpdateReleaseEnvironment { .. }))
            .collect()
    }

    pub fn approvals(&self) -> Vec<i64> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::UpdateReleaseApproval { approval, .. } => Some(approval),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push((call, Instant::now()));
    }

    fn find_environment(&self, release: i64, environment: i64) -> Result<ReleaseEnvironment, DevOpsError> {
        self.state
            .lock()
            .releases
            .get(&release)
            .and_then(|r| r.environments.iter().find(|e| e.id.get() == environment))
            .cloned()
            .ok_or_else(|| not_found("release environment"))
    }
}

fn not_found(operation: &'static str) -> DevOpsError {
    DevOpsError::Status {
        operation,
        status: 404,
        body: "not found".to_string(),
    }
}

fn failure(operation: &'static str) -> DevOpsError {
    DevOpsError::Status {
        operation,
        status: 500,
        body: "internal error".to_string(),
    }
}

#[async_trait]
impl ReleaseOps for FakeReleaseService {
    async fn get_project(&self, _project: &ProjectId) -> Result<Project, DevOpsError> {
        self.record(Call::GetProject);
        if self.state.lock().fail_project {
            return Err(failure("GetProject"));
        }
        Ok(Project {
            id: PROJECT_ID.to_string(),
            name: PROJECT_NAME.to_string(),
        })
    }

    async fn get_release_definitions(
        &self,
        _project: &ProjectId,
        _filter: &DefinitionFilter,
    ) -> Result<Vec<ReleaseDefinition>, DevOpsError> {
        self.record(Call::GetReleaseDefinitions);
        Ok(self.state.lock().definitions.clone())
    }

    async fn get_release(
        &self,
        _project: &ProjectId,
        release: ReleaseId,
    ) -> Result<Release, DevOpsError> {
        self.record(Call::GetRelease(release.get()));
        self.state
            .lock()
            .releases
            .get(&release.get())
            .cloned()
            .ok_or_else(|| not_found("GetRelease"))
    }

    async fn update_release_environment(
        &self,
        _project: &ProjectId,
        release: ReleaseId,
        environment: EnvironmentId,
        update: &EnvironmentUpdate,
    ) -> Result<ReleaseEnvironment, DevOpsError> {
        self.record(Call::UpdateReleaseEnvironment {
            release: release.get(),
            environment: environment.get(),
            status: update.status,
            comment: update.comment.clone(),
        });
        if self.state.lock().fail_updates.contains(&environment.get()) {
            return Err(failure("UpdateReleaseEnvironment"));
        }
        let mut env = self.find_environment(release.get(), environment.get())?;
        env.status = update.status;
        Ok(env)
    }

    async fn get_release_environment(
        &self,
        _project: &ProjectId,
        release: ReleaseId,
        environment: EnvironmentId,
    ) -> Result<ReleaseEnvironment, DevOpsError> {
        self.record(Call::GetReleaseEnvironment {
            release: release.get(),
            environment: environment.get(),
        });
        self.find_environment(release.get(), environment.get())
    }

    async fn update_release_approval(
        &self,
        _project: &ProjectId,
        approval: ApprovalId,
        update: &ApprovalUpdate,
    ) -> Result<Approval, DevOpsError> {
        self.record(Call::UpdateReleaseApproval {
            approval: approval.get(),
            comments: update.comments.clone(),
        });
        if self.state.lock().fail_approvals.contains(&approval.get()) {
            return Err(failure("UpdateReleaseApproval"));
        }
        Ok(Approval {
            id: approval,
            status: update.status,
        })
    }
}

// =============================================================================
// Entity builders
// =============================================================================

pub fn project_reference() -> ProjectReference {
    ProjectReference {
        id: PROJECT_ID.to_string(),
        name: PROJECT_NAME.to_string(),
    }
}

/// Definition with `(environment id, name, current release id)` entries.
pub fn definition(
    name: &str,
    path: Option<&str>,
    environments: &[(i64, &str, Option<i64>)],
    last_release: Option<i64>,
) -> ReleaseDefinition {
    ReleaseDefinition {
        id: DefinitionId::new(1),
        name: name.to_string(),
        path: path.map(str::to_string),
        project_reference: None,
        environments: Some(
            environments
                .iter()
                .map(|(id, name, current)| DefinitionEnvironment {
                    id: *id,
                    name: name.to_string(),
                    current_release: current.map(|id| ReleaseReference {
                        id: Some(ReleaseId::new(id)),
                        name: None,
                    }),
                })
                .collect(),
        ),
        last_release: last_release.map(|id| ReleaseReference {
            id: Some(ReleaseId::new(id)),
            name: Some(format!("Rel-{id}")),
        }),
    }
}

pub fn release(id: i64, name: &str, environments: Vec<ReleaseEnvironment>) -> Release {
    Release {
        id: ReleaseId::new(id),
        name: Some(name.to_string()),
        environments,
    }
}

pub fn environment(
    id: i64,
    release_id: i64,
    release_name: &str,
    name: &str,
    status: EnvironmentStatus,
) -> ReleaseEnvironment {
    ReleaseEnvironment {
        id: EnvironmentId::new(id),
        release_id: ReleaseId::new(release_id),
        name: name.to_string(),
        status,
        release: Some(ReleaseReference {
            id: Some(ReleaseId::new(release_id)),
            name: Some(release_name.to_string()),
        }),
        pre_deploy_approvals: Vec::new(),
    }
}

pub fn with_approvals(
    mut environment: ReleaseEnvironment,
    approvals: &[(i64, ApprovalStatus)],
) -> ReleaseEnvironment {
    environment.pre_deploy_approvals = approvals
        .iter()
        .map(|(id, status)| Approval {
            id: ApprovalId::new(*id),
            status: *status,
        })
        .collect();
    environment
}

pub fn key(definition: &str, environment: &str) -> DeploymentKey {
    DeploymentKey::new(PROJECT_ID, PROJECT_NAME, definition, environment)
}

// =============================================================================
// Notifications
// =============================================================================

/// Records delivered messages; endpoints starting with `fail://` reject them.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, endpoint: &str, message: &str) -> Result<(), NotificationError> {
        if endpoint.starts_with("fail://") {
            return Err(NotificationError::UnsupportedScheme("fail".to_string()));
        }
        self.sent
            .lock()
            .push((endpoint.to_string(), message.to_string()));
        Ok(())
    }
}

/// Observer backed by in-memory metrics and a recording notifier.
pub struct Observed {
    pub observer: DeploymentObserver,
    pub metrics: Arc<MemoryMetrics>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn observed(endpoints: &[&str]) -> Observed {
    let metrics = Arc::new(MemoryMetrics::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let notifications = Notifications::new(
        NotificationTemplate::default(),
        endpoints.iter().map(|e| e.to_string()).collect(),
        notifier.clone(),
    );
    Observed {
        observer: DeploymentObserver::new(metrics.clone(), notifications),
        metrics,
        notifier,
    }
}
