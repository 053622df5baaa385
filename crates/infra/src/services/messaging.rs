use super::DeliveryOutcome;
use serde_json::json;
use std::time::Duration;
use tracing::error;
use zelo_reminder_domain::{Channel, GatewayKind};

const CLOUD_API_BASE_URL: &str = "https://graph.facebook.com/v17.0";

#[async_trait::async_trait]
pub trait IMessageGateway: Send + Sync {
    /// Sends a plain text message to one phone number through the
    /// channel's configured gateway.
    async fn send_text(&self, channel: &Channel, to: &str, text: &str) -> DeliveryOutcome;
}

pub struct MessageGatewayClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl MessageGatewayClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    async fn send_evolution(&self, channel: &Channel, to: &str, text: &str) -> DeliveryOutcome {
        let (base_url, api_token, instance) =
            match (&channel.base_url, &channel.api_token, &channel.instance) {
                (Some(base_url), Some(api_token), Some(instance)) => {
                    (base_url, api_token, instance)
                }
                _ => return not_configured(channel),
            };
        let url = format!(
            "{}/message/sendText/{}",
            base_url.trim_end_matches('/'),
            instance
        );
        match self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("apikey", api_token)
            .json(&json!({
                "number": to,
                "text": text,
            }))
            .send()
            .await
        {
            Ok(res) => DeliveryOutcome::from_response(res).await,
            Err(e) => {
                error!(
                    "[Network Error] Evolution gateway error for channel: {}. Error message: {:?}",
                    channel.id, e
                );
                DeliveryOutcome::from_transport_error(&e)
            }
        }
    }

    async fn send_cloud_api(&self, channel: &Channel, to: &str, text: &str) -> DeliveryOutcome {
        let (api_token, instance) = match (&channel.api_token, &channel.instance) {
            (Some(api_token), Some(instance)) => (api_token, instance),
            _ => return not_configured(channel),
        };
        let base_url = channel
            .base_url
            .as_deref()
            .unwrap_or(CLOUD_API_BASE_URL)
            .trim_end_matches('/');
        let url = format!("{}/{}/messages", base_url, instance);
        match self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("authorization", format!("Bearer {}", api_token))
            .json(&json!({
                "messaging_product": "whatsapp",
                "to": to,
                "type": "text",
                "text": { "body": text },
            }))
            .send()
            .await
        {
            Ok(res) => DeliveryOutcome::from_response(res).await,
            Err(e) => {
                error!(
                    "[Network Error] Cloud api gateway error for channel: {}. Error message: {:?}",
                    channel.id, e
                );
                DeliveryOutcome::from_transport_error(&e)
            }
        }
    }
}

fn not_configured(channel: &Channel) -> DeliveryOutcome {
    DeliveryOutcome {
        success: false,
        status_code: None,
        body: None,
        error: Some(format!("Channel: {} is not fully configured", channel.id)),
    }
}

#[async_trait::async_trait]
impl IMessageGateway for MessageGatewayClient {
    async fn send_text(&self, channel: &Channel, to: &str, text: &str) -> DeliveryOutcome {
        match channel.gateway() {
            Some(GatewayKind::Evolution) => self.send_evolution(channel, to, text).await,
            Some(GatewayKind::CloudApi) => self.send_cloud_api(channel, to, text).await,
            None => DeliveryOutcome {
                success: false,
                status_code: None,
                body: None,
                error: Some(format!("Unsupported message gateway: {}", channel.kind)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn an_unknown_gateway_kind_fails_without_a_network_call() {
        let gateway = MessageGatewayClient::new(Duration::from_secs(1));
        let channel = Channel::new("telegram");

        let outcome = gateway
            .send_text(&channel, "+5511999999999", "Oi")
            .await;
        assert!(!outcome.success);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Unsupported message gateway: telegram")
        );
    }

    #[tokio::test]
    async fn a_half_configured_channel_fails_without_a_network_call() {
        let gateway = MessageGatewayClient::new(Duration::from_secs(1));
        let mut channel = Channel::new("evolution");
        channel.api_token = Some("token".to_string());

        let outcome = gateway
            .send_text(&channel, "+5511999999999", "Oi")
            .await;
        assert!(!outcome.success);
        assert_eq!(
            outcome.error,
            Some(format!("Channel: {} is not fully configured", channel.id))
        );
    }
}
