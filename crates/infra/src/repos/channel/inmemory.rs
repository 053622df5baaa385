use super::IChannelRepo;
use crate::repos::shared::inmemory_repo::*;
use zelo_reminder_domain::{Channel, ID};

pub struct InMemoryChannelRepo {
    channels: std::sync::Mutex<Vec<Channel>>,
}

impl InMemoryChannelRepo {
    pub fn new() -> Self {
        Self {
            channels: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IChannelRepo for InMemoryChannelRepo {
    async fn insert(&self, channel: &Channel) -> anyhow::Result<()> {
        insert(channel, &self.channels);
        Ok(())
    }

    async fn find(&self, channel_id: &ID) -> Option<Channel> {
        find(channel_id, &self.channels)
    }
}
