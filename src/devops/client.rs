// ABOUTME: HTTPS client for the Azure DevOps core and release management REST APIs.
// ABOUTME: Authenticates with a personal access token and implements ReleaseOps.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::DevOpsError;
use super::models::{
    Approval, ApprovalUpdate, DefinitionFilter, EnvironmentUpdate, ListResponse, Project, Release,
    ReleaseDefinition, ReleaseEnvironment,
};
use super::traits::ReleaseOps;
use crate::types::{ApprovalId, EnvironmentId, ProjectId, ReleaseId};

const API_VERSION: &str = "5.1";
const ENVIRONMENT_API_VERSION: &str = "5.1-preview.6";
const DEFINITION_EXPAND: &str = "environments,lastRelease";

/// REST client for one Azure DevOps organization.
#[derive(Debug, Clone)]
pub struct AzureDevOpsClient {
    http: Client,
    core_url: String,
    release_url: String,
    access_token: String,
}

impl AzureDevOpsClient {
    /// Create a client for an organization URL such as `https://dev.azure.com/myorg`.
    ///
    /// The release management API lives on a separate host (`vsrm.`) which is
    /// derived from the organization URL.
    pub fn new(organization_url: &str, access_token: impl Into<String>) -> Result<Self, DevOpsError> {
        let core_url = organization_url.trim_end_matches('/').to_string();
        let release_url = release_url_for(&core_url)?;
        Self::with_base_urls(core_url, release_url, access_token)
    }

    /// Create a client with explicit core and release API base URLs.
    pub fn with_base_urls(
        core_url: impl Into<String>,
        release_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, DevOpsError> {
        let http = Client::builder()
            .user_agent(concat!("redeploy-operator/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            core_url: core_url.into().trim_end_matches('/').to_string(),
            release_url: release_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    pub fn release_url(&self) -> &str {
        &self.release_url
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth("", Some(&self.access_token))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    fn release_api(&self, project: &ProjectId, path: &str) -> String {
        format!(
            "{}/{}/_apis/release/{}",
            self.release_url,
            urlencoding::encode(project.as_str()),
            path
        )
    }

    async fn send<T: DeserializeOwned>(
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, DevOpsError> {
        tracing::debug!(operation, "sending release service request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(DevOpsError::Status {
                operation,
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| DevOpsError::Decode {
            operation,
            reason: e.to_string(),
        })
    }

    async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: String,
        api_version: &str,
        body: &B,
    ) -> Result<T, DevOpsError> {
        let request = self
            .request(Method::PATCH, url)
            .query(&[("api-version", api_version)])
            .json(body);
        Self::send(operation, request).await
    }
}

/// Derive the release management host from an organization URL.
///
/// `https://dev.azure.com/org` becomes `https://vsrm.dev.azure.com/org` and
/// `https://org.visualstudio.com` becomes `https://org.vsrm.visualstudio.com`.
/// Any other host is assumed to serve both APIs (on-premises servers).
pub fn release_url_for(organization_url: &str) -> Result<String, DevOpsError> {
    let (scheme, rest) = organization_url
        .split_once("://")
        .ok_or_else(|| DevOpsError::InvalidUrl(organization_url.to_string()))?;
    if rest.is_empty() {
        return Err(DevOpsError::InvalidUrl(organization_url.to_string()));
    }

    let (host, path) = match rest.split_once('/') {
        Some((host, path)) => (host, format!("/{}", path)),
        None => (rest, String::new()),
    };

    let release_host = if host == "dev.azure.com" {
        "vsrm.dev.azure.com".to_string()
    } else if let Some(org) = host.strip_suffix(".visualstudio.com") {
        format!("{}.vsrm.visualstudio.com", org)
    } else {
        host.to_string()
    };

    Ok(format!(
        "{}://{}{}",
        scheme,
        release_host,
        path.trim_end_matches('/')
    ))
}

#[async_trait]
impl ReleaseOps for AzureDevOpsClient {
    async fn get_project(&self, project: &ProjectId) -> Result<Project, DevOpsError> {
        let url = format!(
            "{}/_apis/projects/{}",
            self.core_url,
            urlencoding::encode(project.as_str())
        );
        let request = self
            .request(Method::GET, url)
            .query(&[("api-version", API_VERSION)]);
        Self::send("GetProject", request).await
    }

    async fn get_release_definitions(
        &self,
        project: &ProjectId,
        filter: &DefinitionFilter,
    ) -> Result<Vec<ReleaseDefinition>, DevOpsError> {
        let url = self.release_api(project, "definitions");
        let request = self
            .request(Method::GET, url)
            .query(&filter.query_pairs())
            .query(&[("$expand", DEFINITION_EXPAND), ("api-version", API_VERSION)]);
        let list: ListResponse<ReleaseDefinition> =
            Self::send("GetReleaseDefinitions", request).await?;
        Ok(list.value)
    }

    async fn get_release(
        &self,
        project: &ProjectId,
        release: ReleaseId,
    ) -> Result<Release, DevOpsError> {
        let url = self.release_api(project, &format!("releases/{}", release));
        let request = self
            .request(Method::GET, url)
            .query(&[("api-version", API_VERSION)]);
        Self::send("GetRelease", request).await
    }

    async fn update_release_environment(
        &self,
        project: &ProjectId,
        release: ReleaseId,
        environment: EnvironmentId,
        update: &EnvironmentUpdate,
    ) -> Result<ReleaseEnvironment, DevOpsError> {
        let url = self.release_api(
            project,
            &format!("releases/{}/environments/{}", release, environment),
        );
        self.patch(
            "UpdateReleaseEnvironment",
            url,
            ENVIRONMENT_API_VERSION,
            update,
        )
        .await
    }

    async fn get_release_environment(
        &self,
        project: &ProjectId,
        release: ReleaseId,
        environment: EnvironmentId,
    ) -> Result<ReleaseEnvironment, DevOpsError> {
        let url = self.release_api(
            project,
            &format!("releases/{}/environments/{}", release, environment),
        );
        let request = self
            .request(Method::GET, url)
            .query(&[("api-version", ENVIRONMENT_API_VERSION)]);
        Self::send("GetReleaseEnvironment", request).await
    }

    async fn update_release_approval(
        &self,
        project: &ProjectId,
        approval: ApprovalId,
        update: &ApprovalUpdate,
    ) -> Result<Approval, DevOpsError> {
        let url = self.release_api(project, &format!("approvals/{}", approval));
        self.patch("UpdateReleaseApproval", url, API_VERSION, update)
            .await
    }
}
