mod inmemory;
mod store;

pub use inmemory::InMemoryTriggerRepo;
pub use store::StoreTriggerRepo;
use zelo_reminder_domain::ReminderTrigger;

#[async_trait::async_trait]
pub trait ITriggerRepo: Send + Sync {
    async fn insert(&self, trigger: &ReminderTrigger) -> anyhow::Result<()>;
    /// Every active rule. This is the engine's read path, an error here
    /// aborts the whole cycle.
    async fn find_all_active(&self) -> anyhow::Result<Vec<ReminderTrigger>>;
}
