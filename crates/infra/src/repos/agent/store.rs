use super::IAgentRepo;
use crate::repos::shared::store::StoreClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zelo_reminder_domain::{Agent, CalendarApiSettings, CalendarApiVersion, ID};

const COLLECTION: &str = "agents";

pub struct StoreAgentRepo {
    client: Arc<StoreClient>,
}

impl StoreAgentRepo {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AgentRaw {
    id: ID,
    name: Option<String>,
    calendar_provider: Option<String>,
    calendar_api_key: Option<String>,
    calendar_api_url: Option<String>,
    calendar_api_version: Option<CalendarApiVersion>,
    default_event_type: Option<String>,
    channel_id: Option<ID>,
}

impl From<AgentRaw> for Agent {
    fn from(e: AgentRaw) -> Self {
        Self {
            id: e.id,
            name: e.name.unwrap_or_default(),
            calendar: CalendarApiSettings {
                provider: e.calendar_provider.unwrap_or_else(|| "calcom".into()),
                api_key: e.calendar_api_key,
                base_url: e.calendar_api_url,
                version: e.calendar_api_version.unwrap_or_default(),
            },
            default_event_type: e.default_event_type,
            channel_id: e.channel_id,
        }
    }
}

impl From<&Agent> for AgentRaw {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            name: Some(agent.name.clone()),
            calendar_provider: Some(agent.calendar.provider.clone()),
            calendar_api_key: agent.calendar.api_key.clone(),
            calendar_api_url: agent.calendar.base_url.clone(),
            calendar_api_version: Some(agent.calendar.version),
            default_event_type: agent.default_event_type.clone(),
            channel_id: agent.channel_id.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IAgentRepo for StoreAgentRepo {
    async fn insert(&self, agent: &Agent) -> anyhow::Result<()> {
        self.client.insert(COLLECTION, &AgentRaw::from(agent)).await
    }

    async fn find(&self, agent_id: &ID) -> Option<Agent> {
        let rows: Vec<AgentRaw> = self
            .client
            .select(COLLECTION, &[("id", format!("eq.{}", agent_id))])
            .await
            .ok()?;
        rows.into_iter().next().map(|row| row.into())
    }
}
