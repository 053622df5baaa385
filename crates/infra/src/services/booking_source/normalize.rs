use chrono::DateTime;
use serde_json::Value;
use zelo_reminder_domain::{Booking, BookingStatus};

/// Walks a dotted path like `responses.phone.value` into a record.
fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for key in path.split('.') {
        current = current.get(key)?;
    }
    Some(current)
}

/// First non empty string across candidate paths. Provider records are
/// heterogeneous and this is the tolerance mechanism for that.
fn first_non_empty(record: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| match lookup(record, path) {
        Some(Value::String(found)) if !found.trim().is_empty() => {
            Some(found.trim().to_string())
        }
        _ => None,
    })
}

/// Timestamps arrive either as RFC 3339 strings or as raw millis.
fn timestamp_at(record: &Value, paths: &[&str]) -> Option<i64> {
    for path in paths {
        match lookup(record, path) {
            Some(Value::String(raw)) => {
                if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
                    return Some(parsed.timestamp_millis());
                }
            }
            Some(Value::Number(number)) => {
                if let Some(millis) = number.as_i64() {
                    return Some(millis);
                }
            }
            _ => (),
        }
    }
    None
}

fn first_attendee(record: &Value) -> Option<&Value> {
    record
        .get("attendees")
        .and_then(|attendees| attendees.as_array())
        .and_then(|attendees| attendees.iter().find(|attendee| attendee.is_object()))
}

/// Maps one raw provider record into a `Booking`. Returns `None` only
/// when the record has no uid or no start time, every other missing
/// field just stays empty.
pub fn normalize_booking(record: &Value) -> Option<Booking> {
    let uid = first_non_empty(record, &["uid", "id"]).or_else(|| {
        record
            .get("id")
            .and_then(|id| id.as_i64())
            .map(|id| id.to_string())
    })?;
    let start_ts = timestamp_at(record, &["startTime", "start"])?;
    let end_ts = timestamp_at(record, &["endTime", "end"]).unwrap_or(start_ts);

    let attendee = first_attendee(record);

    let attendee_phone = attendee
        .and_then(|attendee| first_non_empty(attendee, &["phoneNumber", "phone"]))
        .or_else(|| {
            first_non_empty(
                record,
                &[
                    "responses.phone.value",
                    "responses.phone",
                    "responses.attendeePhoneNumber.value",
                ],
            )
        });

    // Zone priority: event type, then user, calendar and booking level
    // fields, then the attendee itself, then form responses.
    let attendee_timezone = first_non_empty(
        record,
        &[
            "eventType.timeZone",
            "user.timeZone",
            "calendar.timeZone",
            "timeZone",
            "timezone",
        ],
    )
    .or_else(|| attendee.and_then(|attendee| first_non_empty(attendee, &["timeZone", "timezone"])))
    .or_else(|| first_non_empty(record, &["responses.timezone.value", "responses.timezone"]));

    let status = first_non_empty(record, &["status"])
        .map(|raw| BookingStatus::parse(&raw))
        .unwrap_or_else(|| BookingStatus::Other(String::new()));

    Some(Booking {
        uid,
        title: first_non_empty(record, &["title", "eventType.title"]),
        status,
        start_ts,
        end_ts,
        attendee_name: attendee.and_then(|attendee| first_non_empty(attendee, &["name"])),
        attendee_email: attendee.and_then(|attendee| first_non_empty(attendee, &["email"])),
        attendee_phone,
        attendee_timezone,
        organizer_name: first_non_empty(record, &["organizer.name", "user.name"]),
        organizer_email: first_non_empty(record, &["organizer.email", "user.email"]),
        location: first_non_empty(
            record,
            &[
                "location",
                "responses.location.value",
                "responses.location.optionValue",
            ],
        ),
        meeting_url: first_non_empty(
            record,
            &[
                "meetingUrl",
                "videoCallUrl",
                "metadata.videoCallUrl",
                "eventUrl",
            ],
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_normalizes_a_complete_record() {
        let record = json!({
            "uid": "bk_1",
            "title": "Consulta",
            "status": "ACCEPTED",
            "startTime": "2026-03-10T12:00:00Z",
            "endTime": "2026-03-10T12:30:00Z",
            "attendees": [{
                "name": "Maria",
                "email": "maria@example.com",
                "phoneNumber": "+5511999999999",
                "timeZone": "America/Sao_Paulo"
            }],
            "organizer": { "name": "Dra. Ana", "email": "ana@example.com" },
            "location": "integrations:daily",
            "metadata": { "videoCallUrl": "https://meet.example.com/bk_1" }
        });

        let booking = normalize_booking(&record).unwrap();
        assert_eq!(booking.uid, "bk_1");
        assert_eq!(booking.title.as_deref(), Some("Consulta"));
        assert_eq!(booking.status, BookingStatus::Accepted);
        assert!(booking.status.is_live());
        assert_eq!(booking.start_ts, 1773144000000);
        assert_eq!(booking.end_ts, 1773145800000);
        assert_eq!(booking.attendee_name.as_deref(), Some("Maria"));
        assert_eq!(booking.attendee_phone.as_deref(), Some("+5511999999999"));
        assert_eq!(
            booking.attendee_timezone.as_deref(),
            Some("America/Sao_Paulo")
        );
        assert_eq!(booking.organizer_name.as_deref(), Some("Dra. Ana"));
        assert_eq!(
            booking.meeting_url.as_deref(),
            Some("https://meet.example.com/bk_1")
        );
    }

    #[test]
    fn event_type_zone_outranks_the_attendee_zone() {
        let record = json!({
            "uid": "bk_2",
            "startTime": "2026-03-10T12:00:00Z",
            "eventType": { "timeZone": "Europe/Lisbon" },
            "attendees": [{ "name": "Jo", "timeZone": "America/Sao_Paulo" }]
        });

        let booking = normalize_booking(&record).unwrap();
        assert_eq!(booking.attendee_timezone.as_deref(), Some("Europe/Lisbon"));
    }

    #[test]
    fn the_phone_falls_back_to_the_responses_bag() {
        let record = json!({
            "uid": "bk_3",
            "startTime": "2026-03-10T12:00:00Z",
            "attendees": [{ "name": "Jo" }],
            "responses": { "phone": { "value": "+5511988887777" } }
        });

        let booking = normalize_booking(&record).unwrap();
        assert_eq!(booking.attendee_phone.as_deref(), Some("+5511988887777"));
    }

    #[test]
    fn it_accepts_numeric_ids_and_millis_timestamps() {
        let record = json!({
            "id": 4217,
            "start": 1773144000000i64,
            "status": "upcoming"
        });

        let booking = normalize_booking(&record).unwrap();
        assert_eq!(booking.uid, "4217");
        assert_eq!(booking.start_ts, 1773144000000);
        assert_eq!(booking.end_ts, booking.start_ts);
        assert!(booking.status.is_live());
    }

    #[test]
    fn records_without_uid_or_start_are_rejected() {
        assert!(normalize_booking(&json!({ "startTime": "2026-03-10T12:00:00Z" })).is_none());
        assert!(normalize_booking(&json!({ "uid": "bk_5" })).is_none());
        assert!(normalize_booking(&json!("not an object")).is_none());
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let record = json!({
            "uid": "bk_6",
            "startTime": "2026-03-10T12:00:00Z",
            "attendees": [{ "name": "  ", "phoneNumber": "" }],
            "location": ""
        });

        let booking = normalize_booking(&record).unwrap();
        assert!(booking.attendee_name.is_none());
        assert!(booking.attendee_phone.is_none());
        assert!(booking.location.is_none());
    }
}
