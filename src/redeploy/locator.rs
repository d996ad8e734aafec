// ABOUTME: Resolves the configured project and lists its matching release definitions.
// ABOUTME: Injects the resolved project reference, which list calls leave empty.

use crate::devops::{DefinitionFilter, ProjectReference, ReleaseDefinition, ReleaseOps};
use crate::types::ProjectId;

use super::error::LookupError;

/// Release definitions of `project` matching `filter`, with environments and
/// last release expanded.
pub async fn locate_definitions<C: ReleaseOps + ?Sized>(
    client: &C,
    project: &ProjectId,
    filter: &DefinitionFilter,
) -> Result<Vec<ReleaseDefinition>, LookupError> {
    let resolved = client
        .get_project(project)
        .await
        .map_err(|source| LookupError::Project {
            project: project.clone(),
            source,
        })?;
    let reference = ProjectReference::from(resolved);

    let mut definitions = client
        .get_release_definitions(project, filter)
        .await
        .map_err(|source| LookupError::Definitions {
            project: project.clone(),
            source,
        })?;

    for definition in &mut definitions {
        definition.project_reference = Some(reference.clone());
    }

    tracing::debug!(
        project = %project,
        count = definitions.len(),
        "release definitions located"
    );
    Ok(definitions)
}
