use super::ITriggerRepo;
use crate::repos::shared::store::{parse_store_timestamp, to_store_timestamp, StoreClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zelo_reminder_domain::{DestinationMode, OffsetUnit, ReminderTrigger, TriggerAction, ID};

const COLLECTION: &str = "reminder_triggers";

pub struct StoreTriggerRepo {
    client: Arc<StoreClient>,
}

impl StoreTriggerRepo {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TriggerRaw {
    id: ID,
    agent_id: ID,
    offset_amount: i64,
    offset_unit: OffsetUnit,
    event_type: Option<String>,
    action: TriggerAction,
    webhook_url: Option<String>,
    destination_mode: Option<DestinationMode>,
    fixed_address: Option<String>,
    message_template: Option<String>,
    active: bool,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<TriggerRaw> for ReminderTrigger {
    fn from(e: TriggerRaw) -> Self {
        Self {
            id: e.id,
            agent_id: e.agent_id,
            offset_amount: e.offset_amount,
            offset_unit: e.offset_unit,
            event_type: e.event_type,
            action: e.action,
            webhook_url: e.webhook_url,
            destination_mode: e
                .destination_mode
                .unwrap_or(DestinationMode::PrimaryAttendee),
            fixed_address: e.fixed_address,
            message_template: e.message_template,
            active: e.active,
            created: parse_store_timestamp(e.created_at.as_deref()),
            updated: parse_store_timestamp(e.updated_at.as_deref()),
        }
    }
}

impl From<&ReminderTrigger> for TriggerRaw {
    fn from(trigger: &ReminderTrigger) -> Self {
        Self {
            id: trigger.id.clone(),
            agent_id: trigger.agent_id.clone(),
            offset_amount: trigger.offset_amount,
            offset_unit: trigger.offset_unit,
            event_type: trigger.event_type.clone(),
            action: trigger.action,
            webhook_url: trigger.webhook_url.clone(),
            destination_mode: Some(trigger.destination_mode),
            fixed_address: trigger.fixed_address.clone(),
            message_template: trigger.message_template.clone(),
            active: trigger.active,
            created_at: to_store_timestamp(trigger.created),
            updated_at: to_store_timestamp(trigger.updated),
        }
    }
}

#[async_trait::async_trait]
impl ITriggerRepo for StoreTriggerRepo {
    async fn insert(&self, trigger: &ReminderTrigger) -> anyhow::Result<()> {
        self.client
            .insert(COLLECTION, &TriggerRaw::from(trigger))
            .await
    }

    async fn find_all_active(&self) -> anyhow::Result<Vec<ReminderTrigger>> {
        let rows: Vec<TriggerRaw> = self
            .client
            .select(COLLECTION, &[("active", "eq.true".into())])
            .await?;
        Ok(rows.into_iter().map(|row| row.into()).collect())
    }
}
