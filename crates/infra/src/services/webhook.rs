use super::DeliveryOutcome;
use serde_json::Value;
use std::time::Duration;
use tracing::error;

#[async_trait::async_trait]
pub trait IWebhookSink: Send + Sync {
    async fn send(&self, url: &str, payload: &Value) -> DeliveryOutcome;
}

pub struct WebhookClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl WebhookClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl IWebhookSink for WebhookClient {
    async fn send(&self, url: &str, payload: &Value) -> DeliveryOutcome {
        match self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
        {
            Ok(res) => DeliveryOutcome::from_response(res).await,
            Err(e) => {
                error!(
                    "[Network Error] Webhook delivery to url: {} failed. Error message: {:?}",
                    url, e
                );
                DeliveryOutcome::from_transport_error(&e)
            }
        }
    }
}
