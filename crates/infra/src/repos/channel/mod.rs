mod inmemory;
mod store;

pub use inmemory::InMemoryChannelRepo;
pub use store::StoreChannelRepo;
use zelo_reminder_domain::{Channel, ID};

#[async_trait::async_trait]
pub trait IChannelRepo: Send + Sync {
    async fn insert(&self, channel: &Channel) -> anyhow::Result<()>;
    async fn find(&self, channel_id: &ID) -> Option<Channel>;
}

#[cfg(test)]
mod tests {
    use crate::{setup_context, ZeloContext};
    use zelo_reminder_domain::Channel;

    async fn create_contexts() -> Vec<ZeloContext> {
        vec![ZeloContext::create_inmemory(), setup_context().await]
    }

    #[tokio::test]
    async fn insert_and_find() {
        for ctx in create_contexts().await {
            let mut channel = Channel::new("evolution");
            channel.base_url = Some("https://wa.internal.example".into());
            channel.api_token = Some("token".into());
            channel.instance = Some("main".into());

            assert!(ctx.repos.channel_repo.insert(&channel).await.is_ok());
            let found = ctx.repos.channel_repo.find(&channel.id).await;
            assert_eq!(found, Some(channel));
        }
    }
}
