// ABOUTME: Transport-level errors of the release service client.
// ABOUTME: Covers request failures, non-success statuses, and undecodable payloads.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevOpsError {
    #[error("invalid organization url: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to decode {operation} response: {reason}")]
    Decode {
        operation: &'static str,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl DevOpsError {
    /// HTTP status code for server-side rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            DevOpsError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
