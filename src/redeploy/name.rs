// ABOUTME: Human-readable, namespaced release definition names.
// ABOUTME: Joins the definition folder path and name with forward slashes.

use crate::devops::ReleaseDefinition;

/// Build `path/name` with backslashes normalized and surrounding slashes trimmed.
///
/// Without a path (or with the root folder) the plain name is returned.
pub fn build_definition_name(name: &str, path: Option<&str>) -> String {
    let folder = path
        .map(|p| p.replace('\\', "/"))
        .map(|p| p.trim_matches('/').to_string())
        .unwrap_or_default();

    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

impl ReleaseDefinition {
    /// Name used in logs, metric labels, and notifications.
    pub fn display_name(&self) -> String {
        build_definition_name(&self.name, self.path.as_deref())
    }
}
