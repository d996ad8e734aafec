// ABOUTME: Release management entities as returned by the release service.
// ABOUTME: Definitions, releases, release environments, approvals, and the definition filter.

use serde::{Deserialize, Serialize};

use crate::types::{
    ApprovalId, ApprovalStatus, DefinitionId, EnvironmentId, EnvironmentStatus, ReleaseId,
};

/// A team project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// Project reference carried on a release definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectReference {
    pub id: String,
    pub name: String,
}

impl From<Project> for ProjectReference {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
        }
    }
}

/// Shallow reference to a release.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseReference {
    #[serde(default)]
    pub id: Option<ReleaseId>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ReleaseReference {
    /// The referenced release id, if one is assigned.
    ///
    /// A zero id means "nothing deployed yet" and is treated as absent.
    pub fn assigned_id(&self) -> Option<ReleaseId> {
        self.id.filter(|id| !id.is_zero())
    }
}

/// Environment as listed on a release definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionEnvironment {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub current_release: Option<ReleaseReference>,
}

/// A release definition, expanded with environments and last release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDefinition {
    pub id: DefinitionId,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub project_reference: Option<ProjectReference>,
    #[serde(default)]
    pub environments: Option<Vec<DefinitionEnvironment>>,
    #[serde(default)]
    pub last_release: Option<ReleaseReference>,
}

/// Deployment state of one environment within one release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseEnvironment {
    pub id: EnvironmentId,
    pub release_id: ReleaseId,
    pub name: String,
    #[serde(default)]
    pub status: EnvironmentStatus,
    #[serde(default)]
    pub release: Option<ReleaseReference>,
    #[serde(default)]
    pub pre_deploy_approvals: Vec<Approval>,
}

impl ReleaseEnvironment {
    /// Name of the owning release, falling back to its id.
    pub fn release_name(&self) -> String {
        self.release
            .as_ref()
            .and_then(|r| r.name.clone())
            .unwrap_or_else(|| format!("Release-{}", self.release_id))
    }
}

/// One instantiation of a release definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: ReleaseId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub environments: Vec<ReleaseEnvironment>,
}

impl Release {
    /// Find the environment instance with the given name.
    pub fn environment(&self, name: &str) -> Option<&ReleaseEnvironment> {
        self.environments.iter().find(|env| env.name == name)
    }
}

/// A manual approval gate on a release environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub id: ApprovalId,
    #[serde(default)]
    pub status: ApprovalStatus,
}

/// Body of a release environment status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentUpdate {
    pub comment: String,
    pub status: EnvironmentStatus,
    pub scheduled_deployment_time: Option<String>,
}

impl EnvironmentUpdate {
    pub fn new(status: EnvironmentStatus, comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            status,
            scheduled_deployment_time: None,
        }
    }
}

/// Body of an approval update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalUpdate {
    pub status: ApprovalStatus,
    pub comments: String,
}

/// Release definition search criteria.
///
/// Every field is optional; unset fields are not sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionFilter {
    #[serde(default)]
    pub search_text: Option<String>,
    #[serde(default)]
    pub artifact_type: Option<String>,
    #[serde(default)]
    pub artifact_source_id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub is_exact_name_match: Option<bool>,
    #[serde(default)]
    pub tag_filter: Option<Vec<String>>,
    #[serde(default)]
    pub definition_id_filter: Option<Vec<String>>,
    #[serde(default)]
    pub search_text_contains_folder_name: Option<bool>,
}

impl DefinitionFilter {
    /// Query parameters for the definition list call, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref v) = self.search_text {
            pairs.push(("searchText", v.clone()));
        }
        if let Some(ref v) = self.artifact_type {
            pairs.push(("artifactType", v.clone()));
        }
        if let Some(ref v) = self.artifact_source_id {
            pairs.push(("artifactSourceId", v.clone()));
        }
        if let Some(ref v) = self.path {
            pairs.push(("path", v.clone()));
        }
        if let Some(v) = self.is_exact_name_match {
            pairs.push(("isExactNameMatch", v.to_string()));
        }
        if let Some(ref v) = self.tag_filter {
            pairs.push(("tagFilter", v.join(",")));
        }
        if let Some(ref v) = self.definition_id_filter {
            pairs.push(("definitionIdFilter", v.join(",")));
        }
        if let Some(v) = self.search_text_contains_folder_name {
            pairs.push(("searchTextContainsFolderName", v.to_string()));
        }
        pairs
    }
}

/// Envelope used by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}
