use super::IRunLogRepo;
use crate::repos::shared::store::StoreClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use zelo_reminder_domain::{CycleCounters, RunLogEntry, ID};

const COLLECTION: &str = "reminder_run_logs";

pub struct StoreRunLogRepo {
    client: Arc<StoreClient>,
}

impl StoreRunLogRepo {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunLogRaw {
    id: ID,
    started_at: i64,
    finished_at: Option<i64>,
    duration_millis: Option<i64>,
    success: Option<bool>,
    triggers_total: i64,
    triggers_processed: i64,
    reminders_due: i64,
    reminders_sent: i64,
    reminders_failed: i64,
    skipped_no_event_type: i64,
    skipped_no_phone: i64,
    skipped_already_sent: i64,
    skipped_too_old: i64,
    skipped_too_recent: i64,
    details: Value,
    error: Option<String>,
}

impl From<RunLogRaw> for RunLogEntry {
    fn from(e: RunLogRaw) -> Self {
        Self {
            id: e.id,
            started_at: e.started_at,
            finished_at: e.finished_at,
            duration_millis: e.duration_millis,
            success: e.success,
            counters: CycleCounters {
                triggers_total: e.triggers_total as usize,
                triggers_processed: e.triggers_processed as usize,
                reminders_due: e.reminders_due as usize,
                reminders_sent: e.reminders_sent as usize,
                reminders_failed: e.reminders_failed as usize,
                skipped_no_event_type: e.skipped_no_event_type as usize,
                skipped_no_phone: e.skipped_no_phone as usize,
                skipped_already_sent: e.skipped_already_sent as usize,
                skipped_too_old: e.skipped_too_old as usize,
                skipped_too_recent: e.skipped_too_recent as usize,
            },
            details: serde_json::from_value(e.details).unwrap_or_default(),
            error: e.error,
        }
    }
}

impl From<&RunLogEntry> for RunLogRaw {
    fn from(entry: &RunLogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            started_at: entry.started_at,
            finished_at: entry.finished_at,
            duration_millis: entry.duration_millis,
            success: entry.success,
            triggers_total: entry.counters.triggers_total as i64,
            triggers_processed: entry.counters.triggers_processed as i64,
            reminders_due: entry.counters.reminders_due as i64,
            reminders_sent: entry.counters.reminders_sent as i64,
            reminders_failed: entry.counters.reminders_failed as i64,
            skipped_no_event_type: entry.counters.skipped_no_event_type as i64,
            skipped_no_phone: entry.counters.skipped_no_phone as i64,
            skipped_already_sent: entry.counters.skipped_already_sent as i64,
            skipped_too_old: entry.counters.skipped_too_old as i64,
            skipped_too_recent: entry.counters.skipped_too_recent as i64,
            details: serde_json::to_value(&entry.details)
                .unwrap_or_else(|_| Value::Array(Vec::new())),
            error: entry.error.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IRunLogRepo for StoreRunLogRepo {
    async fn insert(&self, entry: &RunLogEntry) -> anyhow::Result<()> {
        self.client
            .insert(COLLECTION, &RunLogRaw::from(entry))
            .await
    }

    async fn patch(&self, entry: &RunLogEntry) -> anyhow::Result<()> {
        self.client
            .patch(
                COLLECTION,
                &[("id", format!("eq.{}", entry.id))],
                &RunLogRaw::from(entry),
            )
            .await
    }

    async fn find(&self, run_id: &ID) -> Option<RunLogEntry> {
        let rows: Vec<RunLogRaw> = self
            .client
            .select(COLLECTION, &[("id", format!("eq.{}", run_id))])
            .await
            .ok()?;
        rows.into_iter().next().map(|row| row.into())
    }
}
