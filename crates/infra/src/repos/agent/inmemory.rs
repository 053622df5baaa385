use super::IAgentRepo;
use crate::repos::shared::inmemory_repo::*;
use zelo_reminder_domain::{Agent, ID};

pub struct InMemoryAgentRepo {
    agents: std::sync::Mutex<Vec<Agent>>,
}

impl InMemoryAgentRepo {
    pub fn new() -> Self {
        Self {
            agents: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAgentRepo for InMemoryAgentRepo {
    async fn insert(&self, agent: &Agent) -> anyhow::Result<()> {
        insert(agent, &self.agents);
        Ok(())
    }

    async fn find(&self, agent_id: &ID) -> Option<Agent> {
        find(agent_id, &self.agents)
    }
}
