// ABOUTME: Webhook notifier posting JSON payloads with reqwest.
// ABOUTME: Logger endpoints write the message to the tracing log instead.

use async_trait::async_trait;
use reqwest::Client;

use super::Notifier;
use super::endpoint::Endpoint;
use super::error::NotificationError;

#[derive(Debug, Clone, Default)]
pub struct WebhookNotifier {
    http: Client,
}

impl WebhookNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, endpoint: &str, message: &str) -> Result<(), NotificationError> {
        let endpoint = Endpoint::parse(endpoint)?;
        let Some(url) = endpoint.target_url() else {
            tracing::info!(notification = %message, "notification");
            return Ok(());
        };

        let response = self
            .http
            .post(url)
            .json(&endpoint.payload(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
