// ABOUTME: Status enums for release environments and approvals.
// ABOUTME: Mirrors the camelCase values used on the release service wire format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deployment status of one environment within one release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvironmentStatus {
    NotStarted,
    Queued,
    Scheduled,
    InProgress,
    Succeeded,
    Rejected,
    Canceled,
    PartiallySucceeded,
    /// Any value this client does not know. Must stay last for `#[serde(other)]`.
    #[default]
    #[serde(rename = "undefined", other)]
    Unknown,
}

impl EnvironmentStatus {
    /// Whether a deployment is queued or running and must be canceled before a restart.
    pub fn is_active(&self) -> bool {
        matches!(self, EnvironmentStatus::Queued | EnvironmentStatus::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentStatus::Unknown => "undefined",
            EnvironmentStatus::NotStarted => "notStarted",
            EnvironmentStatus::Queued => "queued",
            EnvironmentStatus::Scheduled => "scheduled",
            EnvironmentStatus::InProgress => "inProgress",
            EnvironmentStatus::Succeeded => "succeeded",
            EnvironmentStatus::Rejected => "rejected",
            EnvironmentStatus::Canceled => "canceled",
            EnvironmentStatus::PartiallySucceeded => "partiallySucceeded",
        }
    }
}

impl fmt::Display for EnvironmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a manual approval gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Reassigned,
    Canceled,
    Skipped,
    #[default]
    #[serde(other)]
    Undefined,
}

impl ApprovalStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ApprovalStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Undefined => "undefined",
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
            ApprovalStatus::Reassigned => "reassigned",
            ApprovalStatus::Canceled => "canceled",
            ApprovalStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_queued_and_in_progress_are_active() {
        assert!(EnvironmentStatus::Queued.is_active());
        assert!(EnvironmentStatus::InProgress.is_active());
        assert!(!EnvironmentStatus::NotStarted.is_active());
        assert!(!EnvironmentStatus::Scheduled.is_active());
        assert!(!EnvironmentStatus::Succeeded.is_active());
        assert!(!EnvironmentStatus::Canceled.is_active());
    }

    #[test]
    fn environment_status_uses_wire_names() {
        let status: EnvironmentStatus = serde_json::from_str("\"inProgress\"").unwrap();
        assert_eq!(status, EnvironmentStatus::InProgress);
        assert_eq!(
            serde_json::to_string(&EnvironmentStatus::PartiallySucceeded).unwrap(),
            "\"partiallySucceeded\""
        );
    }

    #[test]
    fn unrecognized_environment_status_is_unknown() {
        let status: EnvironmentStatus = serde_json::from_str("\"somethingNew\"").unwrap();
        assert_eq!(status, EnvironmentStatus::Unknown);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"undefined\"");
    }

    #[test]
    fn unrecognized_approval_status_is_undefined() {
        let status: ApprovalStatus = serde_json::from_str("\"escalated\"").unwrap();
        assert_eq!(status, ApprovalStatus::Undefined);
        assert!(!status.is_pending());
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"undefined\"");
        assert_eq!(ApprovalStatus::default(), ApprovalStatus::Undefined);
        assert_eq!(EnvironmentStatus::default(), EnvironmentStatus::Unknown);
    }

    #[test]
    fn approval_status_round_trips_pending() {
        let status: ApprovalStatus = serde_json::from_str("\"pending\"").unwrap();
        assert!(status.is_pending());
        assert_eq!(status.to_string(), "pending");
    }
}
