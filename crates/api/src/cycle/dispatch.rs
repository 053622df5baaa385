use actix_web::rt::time::sleep;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{error, warn};
use zelo_reminder_api_structs::dtos::ReminderWebhookDTO;
use zelo_reminder_domain::{
    format_instant, render_template, truncate_response, Agent, Booking, Channel, DeliveryLogEntry,
    ReminderTrigger, TriggerAction,
};
use zelo_reminder_infra::{DeliveryOutcome, ZeloContext};
use zelo_reminder_utils::jitter_millis;

/// Sends one due reminder and records the outcome. The delivery log
/// entry is written on failure as well, a failed pair is terminal and
/// will not be retried on later cycles.
pub async fn dispatch_reminder(
    ctx: &ZeloContext,
    trigger: &ReminderTrigger,
    agent: &Agent,
    channel: Option<&Channel>,
    booking: &Booking,
    destination: Option<&str>,
    event_type: &str,
) -> bool {
    let scheduled_for = trigger.scheduled_for(booking.start_ts);

    let outcome = match trigger.action {
        TriggerAction::Webhook => {
            send_webhook_reminder(ctx, trigger, agent, booking, event_type, scheduled_for).await
        }
        TriggerAction::Message => {
            send_message_reminder(ctx, trigger, agent, channel, booking, destination, event_type)
                .await
        }
    };

    let entry = DeliveryLogEntry {
        trigger_id: trigger.id.clone(),
        booking_uid: booking.uid.clone(),
        scheduled_for,
        executed_at: ctx.sys.get_timestamp_millis(),
        success: outcome.success,
        status_code: outcome.status_code,
        response: outcome.body.as_deref().map(truncate_response),
        error: outcome.error.clone(),
    };
    match ctx.repos.delivery_log_repo.insert(&entry).await {
        Ok(true) => (),
        Ok(false) => warn!(
            "Delivery log for trigger: {} and booking: {} was already recorded",
            trigger.id, booking.uid
        ),
        Err(e) => error!(
            "Failed to insert delivery log for trigger: {} and booking: {}. Error: {:?}",
            trigger.id, booking.uid, e
        ),
    }

    outcome.success
}

async fn send_webhook_reminder(
    ctx: &ZeloContext,
    trigger: &ReminderTrigger,
    agent: &Agent,
    booking: &Booking,
    event_type: &str,
    scheduled_for: i64,
) -> DeliveryOutcome {
    let url = match trigger
        .webhook_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
    {
        Some(url) => url,
        None => return failed_outcome("Webhook url is not configured".to_string()),
    };

    let meeting = format_instant(booking.start_ts, booking.attendee_timezone.as_deref());
    let payload = ReminderWebhookDTO {
        trigger_id: trigger.id.clone(),
        agent_id: agent.id.clone(),
        agent_name: agent.name.clone(),
        channel_id: agent.channel_id.clone(),
        event_type_id: event_type.to_string(),
        booking_uid: booking.uid.clone(),
        title: booking.title.clone(),
        attendee_name: booking.attendee_name.clone(),
        attendee_phone: booking.attendee_phone.clone(),
        meeting_time: meeting.formatted,
        meeting_utc_offset: meeting.offset_label,
        time_zone: meeting.time_zone,
        meeting_url: booking.meeting_url.clone(),
        start_time: booking.start_ts,
        scheduled_for,
    };
    let payload = match serde_json::to_value(&payload) {
        Ok(payload) => payload,
        Err(e) => return failed_outcome(format!("Failed to serialize webhook payload: {}", e)),
    };

    ctx.services.webhooks.send(url, &payload).await
}

async fn send_message_reminder(
    ctx: &ZeloContext,
    trigger: &ReminderTrigger,
    agent: &Agent,
    channel: Option<&Channel>,
    booking: &Booking,
    destination: Option<&str>,
    event_type: &str,
) -> DeliveryOutcome {
    let channel = match channel {
        Some(channel) => channel,
        None => return failed_outcome("Message channel is not available".to_string()),
    };
    let to = match destination {
        Some(to) => to,
        None => return failed_outcome("No destination address resolved".to_string()),
    };

    let template = trigger.message_template.as_deref().unwrap_or("");
    let vars = template_vars(agent, booking, event_type, to);
    let text = render_template(template, &vars);
    if text.trim().is_empty() {
        return failed_outcome("Rendered message is empty".to_string());
    }

    // Spread sends out a little so a batch of reminders does not land
    // as one burst.
    let delay = jitter_millis(
        ctx.config.send_delay_min_millis,
        ctx.config.send_delay_max_millis,
    );
    if delay > 0 {
        sleep(Duration::from_millis(delay)).await;
    }

    ctx.services.messages.send_text(channel, to, &text).await
}

fn failed_outcome(error: String) -> DeliveryOutcome {
    DeliveryOutcome {
        success: false,
        status_code: None,
        body: None,
        error: Some(error),
    }
}

fn template_vars(
    agent: &Agent,
    booking: &Booking,
    event_type: &str,
    destination: &str,
) -> HashMap<String, String> {
    let start = format_instant(booking.start_ts, booking.attendee_timezone.as_deref());
    let end = format_instant(booking.end_ts, booking.attendee_timezone.as_deref());

    let name = booking.attendee_name.clone().unwrap_or_default();
    let organizer = booking
        .organizer_name
        .clone()
        .unwrap_or_else(|| agent.name.clone());

    let mut vars = HashMap::new();
    vars.insert("name".to_string(), name.clone());
    vars.insert("first_name".to_string(), first_name(&name));
    vars.insert("organizer_name".to_string(), organizer.clone());
    vars.insert("organizer_first_name".to_string(), first_name(&organizer));
    vars.insert(
        "event_name".to_string(),
        booking.title.clone().unwrap_or_default(),
    );
    vars.insert("event_type_id".to_string(), event_type.to_string());
    vars.insert("date".to_string(), start.date.unwrap_or_default());
    vars.insert("start_time".to_string(), start.time.unwrap_or_default());
    vars.insert("end_time".to_string(), end.time.unwrap_or_default());
    vars.insert(
        "time_zone".to_string(),
        start.offset_label.unwrap_or_default(),
    );
    vars.insert(
        "location".to_string(),
        booking.location.clone().unwrap_or_default(),
    );
    vars.insert(
        "link".to_string(),
        booking.meeting_url.clone().unwrap_or_default(),
    );
    vars.insert(
        "email".to_string(),
        booking.attendee_email.clone().unwrap_or_default(),
    );
    vars.insert(
        "organizer_email".to_string(),
        booking.organizer_email.clone().unwrap_or_default(),
    );
    vars.insert("phone".to_string(), destination.to_string());
    vars
}

fn first_name(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}
