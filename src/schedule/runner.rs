// ABOUTME: Tokio-based runner invoking trigger callbacks at their crontab times.
// ABOUTME: The next firing is computed only after the previous callback has returned.

use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::crontab::Crontab;

/// Runs one task per registered trigger.
///
/// A trigger whose callback overruns its next slot skips the missed slots
/// instead of running twice concurrently. Different triggers are independent.
#[derive(Default)]
pub struct Scheduler {
    tasks: Vec<(String, JoinHandle<()>)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback fired at every occurrence of `crontab`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn add<F, Fut>(&mut self, label: impl Into<String>, crontab: Crontab, job: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let label = label.into();
        let task_label = label.clone();
        let handle = tokio::spawn(async move {
            loop {
                let now = Utc::now();
                let Some(next) = crontab.next_after(now) else {
                    tracing::warn!(trigger = %task_label, crontab = %crontab, "schedule exhausted");
                    return;
                };
                let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
                tracing::debug!(
                    trigger = %task_label,
                    next = %next.to_rfc3339(),
                    "waiting for next firing"
                );
                tokio::time::sleep(wait).await;
                job().await;
            }
        });
        self.tasks.push((label, handle));
    }

    /// Number of registered triggers.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait until every trigger task has finished.
    ///
    /// Trigger tasks only finish when their schedule is exhausted or they panic.
    pub async fn run(self) {
        let (labels, handles): (Vec<_>, Vec<_>) = self.tasks.into_iter().unzip();
        let results = futures::future::join_all(handles).await;
        for (label, result) in labels.iter().zip(results) {
            if let Err(e) = result {
                tracing::error!(trigger = %label, "trigger task failed: {}", e);
            }
        }
    }

    /// Abort every trigger task.
    pub fn shutdown(self) {
        for (_, handle) in self.tasks {
            handle.abort();
        }
    }
}
