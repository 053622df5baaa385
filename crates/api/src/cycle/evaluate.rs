use super::dispatch::dispatch_reminder;
use std::collections::HashMap;
use zelo_reminder_domain::{
    Agent, Booking, Channel, CycleCounters, DestinationMode, DueStatus, ReminderTrigger,
    SkipReason, TriggerAction, TriggerRunDetail, ID,
};
use zelo_reminder_infra::ZeloContext;

/// Lookup caches scoped to one cycle run. Agents and channels are shared
/// across many triggers and the store should only be asked once each.
pub struct RunCaches {
    agents: HashMap<ID, Option<Agent>>,
    channels: HashMap<ID, Option<Channel>>,
}

impl RunCaches {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
            channels: HashMap::new(),
        }
    }

    async fn agent(&mut self, ctx: &ZeloContext, agent_id: &ID) -> Option<Agent> {
        if let Some(agent) = self.agents.get(agent_id) {
            return agent.clone();
        }
        let agent = ctx.repos.agent_repo.find(agent_id).await;
        self.agents.insert(agent_id.clone(), agent.clone());
        agent
    }

    async fn channel(&mut self, ctx: &ZeloContext, channel_id: &ID) -> Option<Channel> {
        if let Some(channel) = self.channels.get(channel_id) {
            return channel.clone();
        }
        let channel = ctx.repos.channel_repo.find(channel_id).await;
        self.channels.insert(channel_id.clone(), channel.clone());
        channel
    }
}

/// Runs one trigger through the full evaluation: resolve its agent and
/// delivery prerequisites, query bookings, decide due pairs, dispatch.
/// Never propagates an error, the outcome lands in the returned detail.
pub async fn process_trigger(
    ctx: &ZeloContext,
    caches: &mut RunCaches,
    trigger: &ReminderTrigger,
    counters: &mut CycleCounters,
    dry_run: bool,
) -> TriggerRunDetail {
    let mut detail = TriggerRunDetail::new(trigger.id.clone(), trigger.agent_id.clone());

    let agent = match caches.agent(ctx, &trigger.agent_id).await {
        Some(agent) => agent,
        None => {
            detail.message = Some(format!("Agent: {} was not found", trigger.agent_id));
            return detail;
        }
    };

    let channel = match trigger.action {
        TriggerAction::Message => {
            let channel_id = match &agent.channel_id {
                Some(channel_id) => channel_id,
                None => {
                    detail.message = Some("Agent has no message channel configured".to_string());
                    return detail;
                }
            };
            match caches.channel(ctx, channel_id).await {
                Some(channel) if channel.is_ready() => Some(channel),
                Some(_) => {
                    detail.message =
                        Some(format!("Channel: {} is not fully configured", channel_id));
                    return detail;
                }
                None => {
                    detail.message = Some(format!("Channel: {} was not found", channel_id));
                    return detail;
                }
            }
        }
        TriggerAction::Webhook => None,
    };

    if agent.calendar.credential().is_none() {
        detail.message = Some("Agent has no calendar api key".to_string());
        return detail;
    }

    let event_type = match resolve_event_type(trigger, &agent) {
        Some(event_type) => event_type,
        None => {
            counters.count_skip(SkipReason::NoEventType);
            counters.triggers_processed += 1;
            detail.message = Some("No event type configured".to_string());
            return detail;
        }
    };
    detail.event_type = Some(event_type.clone());

    let now = ctx.sys.get_timestamp_millis();
    let (range_start, range_end) = ctx
        .config
        .window
        .query_window(now, trigger.offset_millis());

    let bookings = match ctx
        .services
        .bookings
        .list_bookings(&agent, &event_type, range_start, range_end)
        .await
    {
        Ok(bookings) => bookings,
        Err(e) => {
            detail.message = Some(format!("Booking query failed: {}", e));
            return detail;
        }
    };

    let mut bookings: Vec<Booking> = bookings
        .into_iter()
        .filter(|booking| booking.status.is_live())
        .collect();
    bookings.sort_by_key(|booking| booking.start_ts);

    for booking in bookings {
        match trigger.due_status(booking.start_ts, now, &ctx.config.window) {
            DueStatus::Pending => continue,
            DueStatus::TooOld => {
                counters.count_skip(SkipReason::TooOld);
                detail.skipped += 1;
                continue;
            }
            DueStatus::TooRecent => {
                counters.count_skip(SkipReason::TooRecent);
                detail.skipped += 1;
                continue;
            }
            DueStatus::Due => (),
        }

        let destination = match trigger.action {
            TriggerAction::Message => match resolve_destination(trigger, &booking) {
                Some(destination) => Some(destination),
                None => {
                    counters.count_skip(SkipReason::NoPhone);
                    detail.skipped += 1;
                    continue;
                }
            },
            TriggerAction::Webhook => None,
        };

        if ctx
            .repos
            .delivery_log_repo
            .find(&trigger.id, &booking.uid)
            .await
            .is_some()
        {
            counters.count_skip(SkipReason::AlreadySent);
            detail.skipped += 1;
            continue;
        }

        counters.reminders_due += 1;
        detail.attempts += 1;

        if dry_run {
            continue;
        }

        let sent = dispatch_reminder(
            ctx,
            trigger,
            &agent,
            channel.as_ref(),
            &booking,
            destination.as_deref(),
            &event_type,
        )
        .await;
        if sent {
            counters.reminders_sent += 1;
            detail.sent += 1;
        } else {
            counters.reminders_failed += 1;
            detail.failed += 1;
        }
    }

    counters.triggers_processed += 1;
    detail
}

/// The trigger's own scope wins, the agent default covers the rest.
fn resolve_event_type(trigger: &ReminderTrigger, agent: &Agent) -> Option<String> {
    trigger
        .event_type
        .as_deref()
        .filter(|event_type| !event_type.trim().is_empty())
        .or_else(|| {
            agent
                .default_event_type
                .as_deref()
                .filter(|event_type| !event_type.trim().is_empty())
        })
        .map(|event_type| event_type.to_string())
}

fn resolve_destination(trigger: &ReminderTrigger, booking: &Booking) -> Option<String> {
    match trigger.destination_mode {
        DestinationMode::FixedAddress => trigger
            .fixed_address
            .clone()
            .filter(|address| !address.trim().is_empty()),
        DestinationMode::PrimaryAttendee => booking.phone().map(|phone| phone.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zelo_reminder_domain::OffsetUnit;

    fn trigger_for(agent: &Agent, action: TriggerAction) -> ReminderTrigger {
        ReminderTrigger::new(agent.id.clone(), 1, OffsetUnit::Hours, action)
    }

    #[test]
    fn the_trigger_scope_outranks_the_agent_default() {
        let mut agent = Agent::new("Clinica");
        agent.default_event_type = Some("default-et".to_string());
        let mut trigger = trigger_for(&agent, TriggerAction::Webhook);

        assert_eq!(
            resolve_event_type(&trigger, &agent).as_deref(),
            Some("default-et")
        );

        trigger.event_type = Some("own-et".to_string());
        assert_eq!(
            resolve_event_type(&trigger, &agent).as_deref(),
            Some("own-et")
        );

        trigger.event_type = Some("  ".to_string());
        assert_eq!(
            resolve_event_type(&trigger, &agent).as_deref(),
            Some("default-et")
        );
    }

    #[test]
    fn a_fixed_address_wins_over_the_attendee_phone() {
        let agent = Agent::new("Clinica");
        let mut trigger = trigger_for(&agent, TriggerAction::Message);
        trigger.destination_mode = DestinationMode::FixedAddress;
        trigger.fixed_address = Some("+5511900000000".to_string());

        let mut booking = Booking::new("b1", 0, 0);
        booking.attendee_phone = Some("+5511911111111".to_string());

        assert_eq!(
            resolve_destination(&trigger, &booking).as_deref(),
            Some("+5511900000000")
        );

        trigger.destination_mode = DestinationMode::PrimaryAttendee;
        assert_eq!(
            resolve_destination(&trigger, &booking).as_deref(),
            Some("+5511911111111")
        );
    }

    #[test]
    fn an_empty_fixed_address_resolves_to_nothing() {
        let agent = Agent::new("Clinica");
        let mut trigger = trigger_for(&agent, TriggerAction::Message);
        trigger.destination_mode = DestinationMode::FixedAddress;
        trigger.fixed_address = Some(" ".to_string());

        let booking = Booking::new("b1", 0, 0);
        assert!(resolve_destination(&trigger, &booking).is_none());
    }
}
