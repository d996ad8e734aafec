// ABOUTME: Redeployment state marker types for the type state pattern.
// ABOUTME: Each state carries the data gathered by the transition that produced it.

use crate::types::{ApprovalId, ApprovalStatus, EnvironmentStatus};

/// Environment instance located in the live release.
/// Available actions: `settle()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Located;

/// No deployment is queued or running any more.
/// Available actions: `start()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Settled {
    canceled: bool,
}

impl Settled {
    pub(crate) fn new(canceled: bool) -> Self {
        Self { canceled }
    }

    /// Whether a running deployment had to be canceled first.
    pub fn canceled(&self) -> bool {
        self.canceled
    }
}

/// The requested status transition was accepted.
/// Available actions: `approve_pending()`, `finish()`
#[derive(Debug, Clone, Copy)]
pub struct Started {
    canceled: bool,
    status: EnvironmentStatus,
}

impl Started {
    pub(crate) fn new(canceled: bool, status: EnvironmentStatus) -> Self {
        Self { canceled, status }
    }

    pub fn canceled(&self) -> bool {
        self.canceled
    }

    /// Status that was requested.
    pub fn status(&self) -> EnvironmentStatus {
        self.status
    }
}

/// Pending approvals were resolved.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Approved {
    started: Started,
    approvals: Vec<(ApprovalId, ApprovalStatus)>,
}

impl Approved {
    pub(crate) fn new(started: Started, approvals: Vec<(ApprovalId, ApprovalStatus)>) -> Self {
        Self { started, approvals }
    }

    pub fn started(&self) -> &Started {
        &self.started
    }

    pub fn approvals(&self) -> &[(ApprovalId, ApprovalStatus)] {
        &self.approvals
    }
}
