use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Why a pair or trigger was skipped instead of dispatched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// Neither the trigger nor its agent names an event type.
    NoEventType,
    /// No resolvable destination address for the pair.
    NoPhone,
    /// The delivery ledger already holds this pair.
    AlreadySent,
    TooOld,
    TooRecent,
}

/// Counters accumulated over one run of the reminder cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleCounters {
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

impl CycleCounters {
    pub fn count_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NoEventType => self.skipped_no_event_type += 1,
            SkipReason::NoPhone => self.skipped_no_phone += 1,
            SkipReason::AlreadySent => self.skipped_already_sent += 1,
            SkipReason::TooOld => self.skipped_too_old += 1,
            SkipReason::TooRecent => self.skipped_too_recent += 1,
        }
    }
}

/// Per trigger outcome line kept on the run log for operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRunDetail {
    pub trigger_id: ID,
    pub agent_id: ID,
    pub event_type: Option<String>,
    pub attempts: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
    pub message: Option<String>,
}

impl TriggerRunDetail {
    pub fn new(trigger_id: ID, agent_id: ID) -> Self {
        Self {
            trigger_id,
            agent_id,
            event_type: None,
            attempts: 0,
            sent: 0,
            failed: 0,
            skipped: 0,
            message: None,
        }
    }
}

/// What one invocation of the reminder cycle did. Returned to manual
/// callers and folded into the run log.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub dry_run: bool,
    pub counters: CycleCounters,
    pub details: Vec<TriggerRunDetail>,
}

/// Audit record of one cycle execution. Opened at run start, patched at
/// run end. Observability only, the evaluator never reads it back.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLogEntry {
    pub id: ID,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub duration_millis: Option<i64>,
    pub success: Option<bool>,
    pub counters: CycleCounters,
    pub details: Vec<TriggerRunDetail>,
    pub error: Option<String>,
}

impl RunLogEntry {
    pub fn open(started_at: i64) -> Self {
        Self {
            id: Default::default(),
            started_at,
            finished_at: None,
            duration_millis: None,
            success: None,
            counters: Default::default(),
            details: Vec::new(),
            error: None,
        }
    }
}

impl Entity for RunLogEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
