use super::ITriggerRepo;
use crate::repos::shared::inmemory_repo::*;
use zelo_reminder_domain::ReminderTrigger;

pub struct InMemoryTriggerRepo {
    triggers: std::sync::Mutex<Vec<ReminderTrigger>>,
}

impl InMemoryTriggerRepo {
    pub fn new() -> Self {
        Self {
            triggers: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITriggerRepo for InMemoryTriggerRepo {
    async fn insert(&self, trigger: &ReminderTrigger) -> anyhow::Result<()> {
        insert(trigger, &self.triggers);
        Ok(())
    }

    async fn find_all_active(&self) -> anyhow::Result<Vec<ReminderTrigger>> {
        Ok(find_by(&self.triggers, |trigger| trigger.active))
    }
}
