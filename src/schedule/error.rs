// ABOUTME: Schedule error types with SNAFU pattern.
// ABOUTME: Reports crontab expressions that cannot be parsed or never fire.

use snafu::Snafu;

/// Errors raised while building trigger schedules.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ScheduleError {
    #[snafu(display("invalid crontab \"{expression}\": {source}"))]
    InvalidCrontab {
        expression: String,
        source: cron::error::Error,
    },

    #[snafu(display("crontab \"{expression}\" has no upcoming firing"))]
    NeverFires { expression: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleErrorKind {
    /// Expression could not be parsed.
    InvalidCrontab,
    /// Expression parsed but yields no future time.
    NeverFires,
}

impl ScheduleError {
    pub fn kind(&self) -> ScheduleErrorKind {
        match self {
            ScheduleError::InvalidCrontab { .. } => ScheduleErrorKind::InvalidCrontab,
            ScheduleError::NeverFires { .. } => ScheduleErrorKind::NeverFires,
        }
    }

    /// The offending expression as written in the configuration.
    pub fn expression(&self) -> &str {
        match self {
            ScheduleError::InvalidCrontab { expression, .. }
            | ScheduleError::NeverFires { expression } => expression,
        }
    }
}
