// ABOUTME: Auto-approval of pending pre-deployment approval gates.
// ABOUTME: Only approvals observed in Pending state are ever touched.

use crate::devops::{Approval, ApprovalUpdate, ReleaseOps};
use crate::types::{ApprovalId, ApprovalStatus, ProjectId};

use super::error::ApprovalError;

/// Comment attached to every automatic approval.
pub const AUTO_APPROVAL_COMMENT: &str = "auto-approval by redeploy-operator";

/// Ids of the approvals that are pending, in input order.
pub fn pending_approvals(approvals: &[Approval]) -> Vec<ApprovalId> {
    approvals
        .iter()
        .filter(|approval| approval.status.is_pending())
        .map(|approval| approval.id)
        .collect()
}

/// Approve every pending approval.
///
/// Returns `(approval id, status reported by the service)` per approved gate.
/// The first failing update aborts the remaining approvals.
pub async fn approve_pending<C: ReleaseOps + ?Sized>(
    client: &C,
    project: &ProjectId,
    approvals: &[Approval],
) -> Result<Vec<(ApprovalId, ApprovalStatus)>, ApprovalError> {
    let update = ApprovalUpdate {
        status: ApprovalStatus::Approved,
        comments: AUTO_APPROVAL_COMMENT.to_string(),
    };

    let mut outcomes = Vec::new();
    for id in pending_approvals(approvals) {
        tracing::info!(approval_id = %id, "auto-approving pending approval");
        let approval = client
            .update_release_approval(project, id, &update)
            .await
            .map_err(|source| {
                tracing::error!(approval_id = %id, "auto-approval failed: {}", source);
                ApprovalError {
                    approval: id,
                    source,
                }
            })?;
        tracing::info!(approval_id = %id, status = %approval.status, "approval updated");
        outcomes.push((id, approval.status));
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approval(id: i64, status: ApprovalStatus) -> Approval {
        Approval {
            id: ApprovalId::new(id),
            status,
        }
    }

    #[test]
    fn selects_only_pending() {
        let approvals = vec![
            approval(1, ApprovalStatus::Pending),
            approval(2, ApprovalStatus::Approved),
            approval(3, ApprovalStatus::Pending),
            approval(4, ApprovalStatus::Rejected),
            approval(5, ApprovalStatus::Reassigned),
        ];
        assert_eq!(
            pending_approvals(&approvals),
            vec![ApprovalId::new(1), ApprovalId::new(3)]
        );
    }

    #[test]
    fn nothing_pending_selects_nothing() {
        let approvals = vec![
            approval(1, ApprovalStatus::Skipped),
            approval(2, ApprovalStatus::Canceled),
        ];
        assert!(pending_approvals(&approvals).is_empty());
        assert!(pending_approvals(&[]).is_empty());
    }
}
