mod inmemory;
mod store;

pub use inmemory::InMemoryDeliveryLogRepo;
pub use store::StoreDeliveryLogRepo;
use zelo_reminder_domain::{DeliveryLogEntry, ID};

#[async_trait::async_trait]
pub trait IDeliveryLogRepo: Send + Sync {
    /// Records a delivery attempt. Returns `false` when the store already
    /// holds an entry for this (trigger, booking) pair, which is the
    /// authoritative guard against double sending.
    async fn insert(&self, entry: &DeliveryLogEntry) -> anyhow::Result<bool>;
    async fn find(&self, trigger_id: &ID, booking_uid: &str) -> Option<DeliveryLogEntry>;
}

#[cfg(test)]
mod tests {
    use crate::{setup_context, ZeloContext};
    use zelo_reminder_domain::{DeliveryLogEntry, ID};

    async fn create_contexts() -> Vec<ZeloContext> {
        vec![ZeloContext::create_inmemory(), setup_context().await]
    }

    fn entry(trigger_id: &ID, booking_uid: &str) -> DeliveryLogEntry {
        DeliveryLogEntry {
            trigger_id: trigger_id.clone(),
            booking_uid: booking_uid.into(),
            scheduled_for: 1000,
            executed_at: 2000,
            success: true,
            status_code: Some(200),
            response: None,
            error: None,
        }
    }

    #[tokio::test]
    async fn a_pair_can_only_be_recorded_once() {
        for ctx in create_contexts().await {
            let trigger_id = ID::new();
            let first = entry(&trigger_id, "booking-1");

            assert_eq!(
                ctx.repos.delivery_log_repo.insert(&first).await.unwrap(),
                true
            );
            assert_eq!(
                ctx.repos.delivery_log_repo.insert(&first).await.unwrap(),
                false
            );

            // A different booking under the same trigger is a new pair
            let other = entry(&trigger_id, "booking-2");
            assert_eq!(
                ctx.repos.delivery_log_repo.insert(&other).await.unwrap(),
                true
            );
        }
    }

    #[tokio::test]
    async fn failed_attempts_are_recorded_and_found() {
        for ctx in create_contexts().await {
            let trigger_id = ID::new();
            let mut failed = entry(&trigger_id, "booking-1");
            failed.success = false;
            failed.status_code = Some(500);
            failed.error = Some("Unexpected status code: 500".into());

            assert!(ctx.repos.delivery_log_repo.insert(&failed).await.unwrap());

            let found = ctx
                .repos
                .delivery_log_repo
                .find(&trigger_id, "booking-1")
                .await
                .unwrap();
            assert!(!found.success);
            assert_eq!(found.status_code, Some(500));

            assert!(ctx
                .repos
                .delivery_log_repo
                .find(&trigger_id, "booking-2")
                .await
                .is_none());
        }
    }
}
