use super::IDeliveryLogRepo;
use zelo_reminder_domain::{DeliveryLogEntry, ID};

pub struct InMemoryDeliveryLogRepo {
    logs: std::sync::Mutex<Vec<DeliveryLogEntry>>,
}

impl InMemoryDeliveryLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDeliveryLogRepo for InMemoryDeliveryLogRepo {
    async fn insert(&self, entry: &DeliveryLogEntry) -> anyhow::Result<bool> {
        // Check and insert under one lock, the uniqueness guard the store
        // backend gets from its constraint
        let mut logs = self.logs.lock().unwrap();
        let exists = logs
            .iter()
            .any(|e| e.trigger_id == entry.trigger_id && e.booking_uid == entry.booking_uid);
        if exists {
            return Ok(false);
        }
        logs.push(entry.clone());
        Ok(true)
    }

    async fn find(&self, trigger_id: &ID, booking_uid: &str) -> Option<DeliveryLogEntry> {
        let logs = self.logs.lock().unwrap();
        logs.iter()
            .find(|e| e.trigger_id == *trigger_id && e.booking_uid == booking_uid)
            .cloned()
    }
}
