// ABOUTME: Cron scheduling of configured triggers.
// ABOUTME: Each trigger runs in its own task; firings of the same trigger never overlap.

mod crontab;
mod error;
mod runner;

pub use crontab::Crontab;
pub use error::{ScheduleError, ScheduleErrorKind};
pub use runner::Scheduler;
