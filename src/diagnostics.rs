// ABOUTME: Diagnostics accumulator for non-fatal configuration warnings during a cycle.
// ABOUTME: Collects skipped environments that should be surfaced but never fail a trigger.

/// Collects non-fatal warnings during a redeployment cycle.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<ConfigurationWarning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: ConfigurationWarning) {
        tracing::warn!(
            release_definition = %warning.definition,
            environment = %warning.environment,
            "{}",
            warning.message()
        );
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[ConfigurationWarning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// An environment that was skipped because the definition lacks a release to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationWarning {
    pub kind: WarningKind,
    pub definition: String,
    pub environment: String,
}

impl ConfigurationWarning {
    /// The definition has never been released.
    pub fn no_latest_release(definition: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::NoLatestRelease,
            definition: definition.into(),
            environment: environment.into(),
        }
    }

    /// Nothing is currently deployed to the environment.
    pub fn no_current_release(
        definition: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            kind: WarningKind::NoCurrentRelease,
            definition: definition.into(),
            environment: environment.into(),
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            WarningKind::NoLatestRelease => format!(
                "no last release found for {}, skipping {}",
                self.definition, self.environment
            ),
            WarningKind::NoCurrentRelease => format!(
                "no current release found for {} in environment {}, skipping",
                self.definition, self.environment
            ),
        }
    }
}

/// Categories of configuration warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Trigger mode `latest` but the definition has no last release.
    NoLatestRelease,
    /// Trigger mode `current` but the environment has no deployed release.
    NoCurrentRelease,
}
