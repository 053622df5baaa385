use super::IDeliveryLogRepo;
use crate::repos::shared::store::StoreClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zelo_reminder_domain::{DeliveryLogEntry, ID};

const COLLECTION: &str = "reminder_delivery_logs";

pub struct StoreDeliveryLogRepo {
    client: Arc<StoreClient>,
}

impl StoreDeliveryLogRepo {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeliveryLogRaw {
    trigger_id: ID,
    booking_uid: String,
    scheduled_for: i64,
    executed_at: i64,
    success: bool,
    status_code: Option<i32>,
    response: Option<String>,
    error: Option<String>,
}

impl From<DeliveryLogRaw> for DeliveryLogEntry {
    fn from(e: DeliveryLogRaw) -> Self {
        Self {
            trigger_id: e.trigger_id,
            booking_uid: e.booking_uid,
            scheduled_for: e.scheduled_for,
            executed_at: e.executed_at,
            success: e.success,
            status_code: e.status_code,
            response: e.response,
            error: e.error,
        }
    }
}

impl From<&DeliveryLogEntry> for DeliveryLogRaw {
    fn from(entry: &DeliveryLogEntry) -> Self {
        Self {
            trigger_id: entry.trigger_id.clone(),
            booking_uid: entry.booking_uid.clone(),
            scheduled_for: entry.scheduled_for,
            executed_at: entry.executed_at,
            success: entry.success,
            status_code: entry.status_code,
            response: entry.response.clone(),
            error: entry.error.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IDeliveryLogRepo for StoreDeliveryLogRepo {
    async fn insert(&self, entry: &DeliveryLogEntry) -> anyhow::Result<bool> {
        // The collection carries a uniqueness constraint on
        // (trigger_id, booking_uid), surfaced as a conflict status
        self.client
            .insert_unique(COLLECTION, &DeliveryLogRaw::from(entry))
            .await
    }

    async fn find(&self, trigger_id: &ID, booking_uid: &str) -> Option<DeliveryLogEntry> {
        let rows: Vec<DeliveryLogRaw> = self
            .client
            .select(
                COLLECTION,
                &[
                    ("trigger_id", format!("eq.{}", trigger_id)),
                    ("booking_uid", format!("eq.{}", booking_uid)),
                ],
            )
            .await
            .ok()?;
        rows.into_iter().next().map(|row| row.into())
    }
}
