// ABOUTME: Summary of one trigger firing.
// ABOUTME: Started deployments, per-environment failures, and configuration warnings.

use crate::diagnostics::Diagnostics;
use crate::types::ReleaseId;

use super::error::TransitionError;
use super::transition::TransitionOutcome;

/// A transition that failed for one environment.
#[derive(Debug)]
pub struct EnvironmentFailure {
    pub definition: String,
    pub environment: String,
    pub release: ReleaseId,
    pub error: TransitionError,
}

/// What one cycle did.
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Release definitions returned by the lookup.
    pub definitions: usize,
    pub deployments: Vec<TransitionOutcome>,
    pub failures: Vec<EnvironmentFailure>,
    pub diagnostics: Diagnostics,
}

impl CycleReport {
    /// Number of approvals resolved by auto-approval.
    pub fn approvals(&self) -> usize {
        self.deployments.iter().map(|d| d.approvals.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub(crate) fn log_summary(&self) {
        tracing::info!(
            definitions = self.definitions,
            deployments = self.deployments.len(),
            approvals = self.approvals(),
            failures = self.failures.len(),
            warnings = self.diagnostics.warnings().len(),
            "cycle finished"
        );
    }
}
