mod booking_source;
mod messaging;
mod webhook;

pub use booking_source::{normalize_booking, CalendarBookingSource, IBookingSource};
pub use messaging::{IMessageGateway, MessageGatewayClient};
pub use webhook::{IWebhookSink, WebhookClient};

use std::sync::Arc;
use std::time::Duration;

/// Result of one outbound delivery attempt. A timeout or transport
/// failure is a failed outcome, never an in flight unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryOutcome {
    pub success: bool,
    pub status_code: Option<i32>,
    pub body: Option<String>,
    pub error: Option<String>,
}

impl DeliveryOutcome {
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.ok().filter(|body| !body.is_empty());
        Self {
            success: status.is_success(),
            status_code: Some(status.as_u16() as i32),
            body,
            error: if status.is_success() {
                None
            } else {
                Some(format!("Unexpected status code: {}", status))
            },
        }
    }

    pub fn from_transport_error(error: &reqwest::Error) -> Self {
        Self {
            success: false,
            status_code: None,
            body: None,
            error: Some(error.to_string()),
        }
    }
}

/// Outbound ports of the engine. Tests swap these for recording fakes.
#[derive(Clone)]
pub struct Services {
    pub bookings: Arc<dyn IBookingSource>,
    pub webhooks: Arc<dyn IWebhookSink>,
    pub messages: Arc<dyn IMessageGateway>,
}

impl Services {
    pub fn create(delivery_timeout: Duration) -> Self {
        Self {
            bookings: Arc::new(CalendarBookingSource::new(delivery_timeout)),
            webhooks: Arc::new(WebhookClient::new(delivery_timeout)),
            messages: Arc::new(MessageGatewayClient::new(delivery_timeout)),
        }
    }
}
