// ABOUTME: Notification delivery errors.
// ABOUTME: Always logged and discarded by the dispatcher, never escalated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("unsupported notification url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid notification url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("notification request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("notification endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
