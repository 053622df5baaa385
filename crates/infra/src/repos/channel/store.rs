use super::IChannelRepo;
use crate::repos::shared::store::StoreClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zelo_reminder_domain::{Channel, ID};

const COLLECTION: &str = "channels";

pub struct StoreChannelRepo {
    client: Arc<StoreClient>,
}

impl StoreChannelRepo {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelRaw {
    id: ID,
    kind: Option<String>,
    base_url: Option<String>,
    api_token: Option<String>,
    instance: Option<String>,
}

impl From<ChannelRaw> for Channel {
    fn from(e: ChannelRaw) -> Self {
        Self {
            id: e.id,
            kind: e.kind.unwrap_or_default(),
            base_url: e.base_url,
            api_token: e.api_token,
            instance: e.instance,
        }
    }
}

impl From<&Channel> for ChannelRaw {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.clone(),
            kind: Some(channel.kind.clone()),
            base_url: channel.base_url.clone(),
            api_token: channel.api_token.clone(),
            instance: channel.instance.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IChannelRepo for StoreChannelRepo {
    async fn insert(&self, channel: &Channel) -> anyhow::Result<()> {
        self.client
            .insert(COLLECTION, &ChannelRaw::from(channel))
            .await
    }

    async fn find(&self, channel_id: &ID) -> Option<Channel> {
        let rows: Vec<ChannelRaw> = self
            .client
            .select(COLLECTION, &[("id", format!("eq.{}", channel_id))])
            .await
            .ok()?;
        rows.into_iter().next().map(|row| row.into())
    }
}
