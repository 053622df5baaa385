use serde::{Deserialize, Serialize};
use zelo_reminder_domain::{CycleCounters, RunSummary, TriggerRunDetail, ID};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CycleCountersDTO {
    pub triggers_total: usize,
    pub triggers_processed: usize,
    pub reminders_due: usize,
    pub reminders_sent: usize,
    pub reminders_failed: usize,
    pub skipped_no_event_type: usize,
    pub skipped_no_phone: usize,
    pub skipped_already_sent: usize,
    pub skipped_too_old: usize,
    pub skipped_too_recent: usize,
}

impl CycleCountersDTO {
    pub fn new(counters: CycleCounters) -> Self {
        Self {
            triggers_total: counters.triggers_total,
            triggers_processed: counters.triggers_processed,
            reminders_due: counters.reminders_due,
            reminders_sent: counters.reminders_sent,
            reminders_failed: counters.reminders_failed,
            skipped_no_event_type: counters.skipped_no_event_type,
            skipped_no_phone: counters.skipped_no_phone,
            skipped_already_sent: counters.skipped_already_sent,
            skipped_too_old: counters.skipped_too_old,
            skipped_too_recent: counters.skipped_too_recent,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRunDetailDTO {
    pub trigger_id: ID,
    pub agent_id: ID,
    pub event_type_id: Option<String>,
    pub attempts: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
    pub message: Option<String>,
}

impl TriggerRunDetailDTO {
    pub fn new(detail: TriggerRunDetail) -> Self {
        Self {
            trigger_id: detail.trigger_id,
            agent_id: detail.agent_id,
            event_type_id: detail.event_type,
            attempts: detail.attempts,
            sent: detail.sent,
            failed: detail.failed,
            skipped: detail.skipped,
            message: detail.message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RunSummaryDTO {
    pub dry_run: bool,
    pub counters: CycleCountersDTO,
    pub details: Vec<TriggerRunDetailDTO>,
}

impl RunSummaryDTO {
    pub fn new(summary: RunSummary) -> Self {
        Self {
            dry_run: summary.dry_run,
            counters: CycleCountersDTO::new(summary.counters),
            details: summary
                .details
                .into_iter()
                .map(TriggerRunDetailDTO::new)
                .collect(),
        }
    }
}

/// Fixed shape payload POSTed to webhook triggers. Consumers rely on
/// these field names staying put.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderWebhookDTO {
    pub trigger_id: ID,
    pub agent_id: ID,
    pub agent_name: String,
    pub channel_id: Option<ID>,
    pub event_type_id: String,
    pub booking_uid: String,
    pub title: Option<String>,
    pub attendee_name: Option<String>,
    pub attendee_phone: Option<String>,
    pub meeting_time: Option<String>,
    pub meeting_utc_offset: Option<String>,
    pub time_zone: Option<String>,
    pub meeting_url: Option<String>,
    pub start_time: i64,
    pub scheduled_for: i64,
}
