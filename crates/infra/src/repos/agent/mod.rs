mod inmemory;
mod store;

pub use inmemory::InMemoryAgentRepo;
pub use store::StoreAgentRepo;
use zelo_reminder_domain::{Agent, ID};

#[async_trait::async_trait]
pub trait IAgentRepo: Send + Sync {
    async fn insert(&self, agent: &Agent) -> anyhow::Result<()>;
    async fn find(&self, agent_id: &ID) -> Option<Agent>;
}
