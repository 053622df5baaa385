use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    Minutes,
    Hours,
    Days,
}

impl OffsetUnit {
    pub fn factor_millis(&self) -> i64 {
        match self {
            Self::Minutes => 60 * 1000,
            Self::Hours => 60 * 60 * 1000,
            Self::Days => 24 * 60 * 60 * 1000,
        }
    }
}

/// Converts a reminder offset into milliseconds. Negative amounts clamp to 0.
pub fn offset_to_millis(amount: i64, unit: OffsetUnit) -> i64 {
    amount.max(0) * unit.factor_millis()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerAction {
    Webhook,
    Message,
}

/// How a message trigger picks the address it sends to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationMode {
    PrimaryAttendee,
    FixedAddress,
}

/// A `ReminderTrigger` is a rule stating that a reminder should go out a
/// fixed amount of time before a booking starts, either as a webhook call
/// to a configured URL or as a templated message through the owning
/// `Agent`s messaging channel.
///
/// Rules are created and edited elsewhere and are read-only to this engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderTrigger {
    pub id: ID,
    pub agent_id: ID,
    pub offset_amount: i64,
    pub offset_unit: OffsetUnit,
    /// External event type this rule applies to. When empty the owning
    /// `Agent`s default event type is used instead.
    pub event_type: Option<String>,
    pub action: TriggerAction,
    pub webhook_url: Option<String>,
    pub destination_mode: DestinationMode,
    pub fixed_address: Option<String>,
    pub message_template: Option<String>,
    pub active: bool,
    pub created: i64,
    pub updated: i64,
}

impl ReminderTrigger {
    pub fn new(
        agent_id: ID,
        offset_amount: i64,
        offset_unit: OffsetUnit,
        action: TriggerAction,
    ) -> Self {
        Self {
            id: Default::default(),
            agent_id,
            offset_amount,
            offset_unit,
            event_type: None,
            action,
            webhook_url: None,
            destination_mode: DestinationMode::PrimaryAttendee,
            fixed_address: None,
            message_template: None,
            active: true,
            created: 0,
            updated: 0,
        }
    }

    pub fn offset_millis(&self) -> i64 {
        offset_to_millis(self.offset_amount, self.offset_unit)
    }

    /// Timestamp of the last create or edit of this rule. Any edit re-arms
    /// the grace window for all of its pending bookings.
    pub fn activation_ts(&self) -> i64 {
        self.created.max(self.updated)
    }

    /// The instant at which the reminder for a booking starting at
    /// `start_ts` should be delivered.
    pub fn scheduled_for(&self, start_ts: i64) -> i64 {
        start_ts - self.offset_millis()
    }

    pub fn due_status(&self, start_ts: i64, now: i64, policy: &WindowPolicy) -> DueStatus {
        let scheduled_for = self.scheduled_for(start_ts);
        if scheduled_for > now {
            return DueStatus::Pending;
        }
        if policy.max_lookback > 0 && scheduled_for < now - policy.max_lookback {
            return DueStatus::TooOld;
        }
        if scheduled_for < self.activation_ts() + policy.grace_window {
            return DueStatus::TooRecent;
        }
        DueStatus::Due
    }
}

impl Entity for ReminderTrigger {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Where a (trigger, booking) pair stands relative to its scheduled
/// delivery instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DueStatus {
    /// Scheduled instant is still ahead of now.
    Pending,
    Due,
    /// Scheduled instant fell out of the lookback window.
    TooOld,
    /// Scheduled instant predates the rule's grace cutoff.
    TooRecent,
}

/// Durations steering the due decision, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowPolicy {
    /// Slack added to both edges of the booking query window to absorb
    /// clock skew against the booking source.
    pub tolerance: i64,
    /// How long after its scheduled instant a pair may still fire.
    /// Zero disables the cutoff.
    pub max_lookback: i64,
    /// Quiet period after a rule is created or edited in which pairs whose
    /// scheduled instant already passed are not fired.
    pub grace_window: i64,
}

impl WindowPolicy {
    /// Booking query range for one trigger. Wide enough to hold both
    /// "reminder already due" and "not due yet" bookings so a single
    /// query per trigger suffices.
    pub fn query_window(&self, now: i64, offset_millis: i64) -> (i64, i64) {
        (
            now - self.tolerance - self.max_lookback,
            now + offset_millis + self.tolerance,
        )
    }
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            tolerance: 5 * 60 * 1000,
            max_lookback: 12 * 60 * 60 * 1000,
            grace_window: 5 * 60 * 1000,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn trigger_with_offset(amount: i64, unit: OffsetUnit) -> ReminderTrigger {
        ReminderTrigger::new(Default::default(), amount, unit, TriggerAction::Webhook)
    }

    #[test]
    fn it_converts_offsets_to_millis() {
        assert_eq!(offset_to_millis(1, OffsetUnit::Minutes), 60 * 1000);
        assert_eq!(offset_to_millis(2, OffsetUnit::Hours), 2 * 60 * 60 * 1000);
        assert_eq!(
            offset_to_millis(3, OffsetUnit::Days),
            3 * 24 * 60 * 60 * 1000
        );
        assert_eq!(offset_to_millis(-10, OffsetUnit::Days), 0);
        assert_eq!(offset_to_millis(0, OffsetUnit::Minutes), 0);
    }

    #[test]
    fn it_becomes_due_exactly_at_the_offset_edge() {
        let trigger = trigger_with_offset(1, OffsetUnit::Hours);
        let policy = WindowPolicy::default();
        let start_ts = 100 * 60 * 60 * 1000;
        let one_hour = 60 * 60 * 1000;

        assert_eq!(
            trigger.due_status(start_ts, start_ts - one_hour - 1, &policy),
            DueStatus::Pending
        );
        assert_eq!(
            trigger.due_status(start_ts, start_ts - one_hour, &policy),
            DueStatus::Due
        );
        assert_eq!(
            trigger.due_status(start_ts, start_ts - one_hour + 1000, &policy),
            DueStatus::Due
        );
    }

    #[test]
    fn it_skips_pairs_older_than_the_lookback_window() {
        let trigger = trigger_with_offset(10, OffsetUnit::Minutes);
        let policy = WindowPolicy::default();
        let start_ts = 1000 * 60 * 60 * 1000;
        let scheduled_for = trigger.scheduled_for(start_ts);

        let now = scheduled_for + policy.max_lookback;
        assert_eq!(trigger.due_status(start_ts, now, &policy), DueStatus::Due);
        assert_eq!(
            trigger.due_status(start_ts, now + 1, &policy),
            DueStatus::TooOld
        );
    }

    #[test]
    fn zero_lookback_disables_the_age_cutoff() {
        let trigger = trigger_with_offset(10, OffsetUnit::Minutes);
        let policy = WindowPolicy {
            max_lookback: 0,
            ..Default::default()
        };
        let start_ts = 1000 * 60 * 60 * 1000;
        let now = start_ts + 365 * 24 * 60 * 60 * 1000;

        assert_eq!(trigger.due_status(start_ts, now, &policy), DueStatus::Due);
    }

    #[test]
    fn freshly_edited_rules_hold_back_past_due_pairs() {
        let mut trigger = trigger_with_offset(1, OffsetUnit::Hours);
        let policy = WindowPolicy::default();
        let start_ts = 100 * 60 * 60 * 1000;
        let scheduled_for = trigger.scheduled_for(start_ts);
        let now = scheduled_for + 60 * 1000;

        trigger.created = scheduled_for - 1000;
        trigger.updated = scheduled_for - 1000;
        assert_eq!(
            trigger.due_status(start_ts, now, &policy),
            DueStatus::TooRecent
        );

        trigger.created = scheduled_for - policy.grace_window - 1;
        trigger.updated = trigger.created;
        assert_eq!(trigger.due_status(start_ts, now, &policy), DueStatus::Due);
    }

    #[test]
    fn an_edit_alone_rearms_the_grace_window() {
        let mut trigger = trigger_with_offset(1, OffsetUnit::Hours);
        let policy = WindowPolicy::default();
        let start_ts = 100 * 60 * 60 * 1000;
        let scheduled_for = trigger.scheduled_for(start_ts);

        trigger.created = 0;
        trigger.updated = scheduled_for - 1000;
        assert_eq!(
            trigger.due_status(start_ts, scheduled_for + 1, &policy),
            DueStatus::TooRecent
        );
    }

    #[test]
    fn it_computes_the_query_window() {
        let policy = WindowPolicy::default();
        let now = 1_000_000_000;
        let offset = 24 * 60 * 60 * 1000;
        let (from, to) = policy.query_window(now, offset);

        assert_eq!(from, now - policy.tolerance - policy.max_lookback);
        assert_eq!(to, now + offset + policy.tolerance);
    }
}
