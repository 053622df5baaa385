use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use serde_json::Value;
use zelo_reminder_domain::{Agent, Booking, Channel};
use zelo_reminder_infra::{DeliveryOutcome, IBookingSource, IMessageGateway, ISys, IWebhookSink};

/// Clock that only moves when a test tells it to.
pub struct StaticTimeSys {
    now: AtomicI64,
}

impl StaticTimeSys {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Booking source that returns a canned list and records every query
/// window it was asked for.
#[derive(Default)]
pub struct FakeBookingSource {
    pub bookings: Mutex<Vec<Booking>>,
    pub queries: Mutex<Vec<(String, i64, i64)>>,
}

#[async_trait::async_trait]
impl IBookingSource for FakeBookingSource {
    async fn list_bookings(
        &self,
        _agent: &Agent,
        event_type: &str,
        range_start: i64,
        range_end: i64,
    ) -> anyhow::Result<Vec<Booking>> {
        self.queries
            .lock()
            .unwrap()
            .push((event_type.to_string(), range_start, range_end));
        Ok(self.bookings.lock().unwrap().clone())
    }
}

/// Webhook sink that records deliveries instead of making HTTP calls.
/// Set `fail_with_status` to make every delivery come back as a failure.
#[derive(Default)]
pub struct FakeWebhookSink {
    pub sent: Mutex<Vec<(String, Value)>>,
    pub fail_with_status: Mutex<Option<i32>>,
}

#[async_trait::async_trait]
impl IWebhookSink for FakeWebhookSink {
    async fn send(&self, url: &str, payload: &Value) -> DeliveryOutcome {
        self.sent
            .lock()
            .unwrap()
            .push((url.to_string(), payload.clone()));
        match *self.fail_with_status.lock().unwrap() {
            Some(status_code) => DeliveryOutcome {
                success: false,
                status_code: Some(status_code),
                body: Some("sink rejected the payload".to_string()),
                error: Some(format!("Unexpected status code: {}", status_code)),
            },
            None => DeliveryOutcome {
                success: true,
                status_code: Some(200),
                body: None,
                error: None,
            },
        }
    }
}

/// Message gateway that records (channel id, destination, text) triples.
#[derive(Default)]
pub struct FakeMessageGateway {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait::async_trait]
impl IMessageGateway for FakeMessageGateway {
    async fn send_text(&self, channel: &Channel, to: &str, text: &str) -> DeliveryOutcome {
        self.sent
            .lock()
            .unwrap()
            .push((channel.id.as_string(), to.to_string(), text.to_string()));
        DeliveryOutcome {
            success: true,
            status_code: Some(201),
            body: None,
            error: None,
        }
    }
}
