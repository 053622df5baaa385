mod agent;
mod channel;
mod delivery_log;
mod run_log;
mod shared;
mod trigger;

use agent::{IAgentRepo, InMemoryAgentRepo, StoreAgentRepo};
use channel::{IChannelRepo, InMemoryChannelRepo, StoreChannelRepo};
use delivery_log::{IDeliveryLogRepo, InMemoryDeliveryLogRepo, StoreDeliveryLogRepo};
use run_log::{IRunLogRepo, InMemoryRunLogRepo, StoreRunLogRepo};
use shared::store::StoreClient;
use std::sync::Arc;
use trigger::{ITriggerRepo, InMemoryTriggerRepo, StoreTriggerRepo};

#[derive(Clone)]
pub struct Repos {
    pub trigger_repo: Arc<dyn ITriggerRepo>,
    pub agent_repo: Arc<dyn IAgentRepo>,
    pub channel_repo: Arc<dyn IChannelRepo>,
    pub delivery_log_repo: Arc<dyn IDeliveryLogRepo>,
    pub run_log_repo: Arc<dyn IRunLogRepo>,
}

impl Repos {
    pub fn create_store(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let client = Arc::new(StoreClient::new(base_url, api_key)?);
        Ok(Self {
            trigger_repo: Arc::new(StoreTriggerRepo::new(client.clone())),
            agent_repo: Arc::new(StoreAgentRepo::new(client.clone())),
            channel_repo: Arc::new(StoreChannelRepo::new(client.clone())),
            delivery_log_repo: Arc::new(StoreDeliveryLogRepo::new(client.clone())),
            run_log_repo: Arc::new(StoreRunLogRepo::new(client)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            trigger_repo: Arc::new(InMemoryTriggerRepo::new()),
            agent_repo: Arc::new(InMemoryAgentRepo::new()),
            channel_repo: Arc::new(InMemoryChannelRepo::new()),
            delivery_log_repo: Arc::new(InMemoryDeliveryLogRepo::new()),
            run_log_repo: Arc::new(InMemoryRunLogRepo::new()),
        }
    }
}
