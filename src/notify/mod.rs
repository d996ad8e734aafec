// ABOUTME: Best-effort deployment notifications.
// ABOUTME: Renders the template and fans the message out to every configured endpoint.

mod endpoint;
mod error;
mod template;
mod webhook;

pub use endpoint::Endpoint;
pub use error::NotificationError;
pub use template::NotificationTemplate;
pub use webhook::WebhookNotifier;

use async_trait::async_trait;
use std::sync::Arc;

/// Delivers one message to one endpoint URL.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, endpoint: &str, message: &str) -> Result<(), NotificationError>;
}

/// Template plus endpoint list; delivery failures are logged and discarded.
#[derive(Clone)]
pub struct Notifications {
    template: NotificationTemplate,
    endpoints: Vec<String>,
    notifier: Arc<dyn Notifier>,
}

impl Notifications {
    pub fn new(
        template: NotificationTemplate,
        endpoints: Vec<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            template,
            endpoints,
            notifier,
        }
    }

    /// A dispatcher without endpoints.
    pub fn disabled() -> Self {
        Self::new(
            NotificationTemplate::default(),
            Vec::new(),
            Arc::new(WebhookNotifier::new()),
        )
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Send `message` to every endpoint concurrently.
    ///
    /// Returns the number of endpoints that accepted the message.
    pub async fn dispatch(&self, message: &str) -> usize {
        if self.endpoints.is_empty() {
            return 0;
        }

        let rendered = self.template.render(message);
        let sends = self
            .endpoints
            .iter()
            .map(|endpoint| self.notifier.send(endpoint, &rendered));
        let results = futures::future::join_all(sends).await;

        let mut delivered = 0;
        for (endpoint, result) in self.endpoints.iter().zip(results) {
            match result {
                Ok(()) => delivered += 1,
                Err(e) => tracing::error!(
                    endpoint = %redact(endpoint),
                    "unable to send notification: {}",
                    e
                ),
            }
        }
        delivered
    }
}

/// Endpoint URLs embed secrets; only the scheme is logged.
fn redact(endpoint: &str) -> String {
    match endpoint.split_once("://") {
        Some((scheme, _)) => format!("{}://***", scheme),
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Notifier for Recorder {
        async fn send(&self, endpoint: &str, message: &str) -> Result<(), NotificationError> {
            if endpoint.starts_with("broken") {
                return Err(NotificationError::UnsupportedScheme("broken".to_string()));
            }
            self.sent
                .lock()
                .push((endpoint.to_string(), message.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn failing_endpoint_does_not_block_others() {
        let recorder = Arc::new(Recorder::default());
        let notifications = Notifications::new(
            NotificationTemplate::new("[ops] %v"),
            vec![
                "logger://a".to_string(),
                "broken://b".to_string(),
                "logger://c".to_string(),
            ],
            recorder.clone(),
        );

        let delivered = notifications.dispatch("deployed").await;

        assert_eq!(delivered, 2);
        let sent = recorder.sent.lock();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|(_, message)| message == "[ops] deployed"));
    }

    #[tokio::test]
    async fn disabled_dispatcher_sends_nothing() {
        assert_eq!(Notifications::disabled().dispatch("x").await, 0);
    }

    #[test]
    fn redact_hides_tokens() {
        assert_eq!(redact("slack://a/b/c"), "slack://***");
        assert_eq!(redact("nonsense"), "***");
    }
}
