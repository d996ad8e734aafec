// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Handles target environment lists and project identifiers.

use nonempty::NonEmpty;
use serde::Deserialize;

use crate::types::ProjectId;

pub fn deserialize_environments<'de, D>(deserializer: D) -> Result<NonEmpty<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<String> = Vec::deserialize(deserializer)?;
    let mut names: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(serde::de::Error::custom("environment names cannot be empty"));
        }
        // Duplicates would be deployed twice per tick.
        if !names.contains(&value) {
            names.push(value);
        }
    }

    NonEmpty::from_vec(names)
        .ok_or_else(|| serde::de::Error::custom("at least one environment is required"))
}

pub fn deserialize_project<'de, D>(deserializer: D) -> Result<ProjectId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let s = s.trim();
    if s.is_empty() {
        return Err(serde::de::Error::custom("project cannot be empty"));
    }
    Ok(ProjectId::new(s))
}
