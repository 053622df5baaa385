mod inmemory;
mod store;

pub use inmemory::InMemoryRunLogRepo;
pub use store::StoreRunLogRepo;
use zelo_reminder_domain::{RunLogEntry, ID};

#[async_trait::async_trait]
pub trait IRunLogRepo: Send + Sync {
    async fn insert(&self, entry: &RunLogEntry) -> anyhow::Result<()>;
    /// Writes the final counters and timing onto an already opened entry
    async fn patch(&self, entry: &RunLogEntry) -> anyhow::Result<()>;
    async fn find(&self, run_id: &ID) -> Option<RunLogEntry>;
}
