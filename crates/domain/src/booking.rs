/// Normalized status of a booking. Provider statuses outside the three
/// live values are preserved for logging but never produce reminders.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingStatus {
    Accepted,
    Confirmed,
    Upcoming,
    Other(String),
}

impl BookingStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "accepted" => Self::Accepted,
            "confirmed" => Self::Confirmed,
            "upcoming" => Self::Upcoming,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Accepted | Self::Confirmed | Self::Upcoming)
    }
}

/// A `Booking` is one calendar reservation in the shape every booking
/// source adapter normalizes to. It is ephemeral and never persisted by
/// this engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub uid: String,
    pub title: Option<String>,
    pub status: BookingStatus,
    pub start_ts: i64,
    pub end_ts: i64,
    pub attendee_name: Option<String>,
    pub attendee_email: Option<String>,
    pub attendee_phone: Option<String>,
    /// IANA zone name, first non empty candidate across provider fields.
    pub attendee_timezone: Option<String>,
    pub organizer_name: Option<String>,
    pub organizer_email: Option<String>,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
}

impl Booking {
    pub fn new(uid: &str, start_ts: i64, end_ts: i64) -> Self {
        Self {
            uid: uid.into(),
            title: None,
            status: BookingStatus::Accepted,
            start_ts,
            end_ts,
            attendee_name: None,
            attendee_email: None,
            attendee_phone: None,
            attendee_timezone: None,
            organizer_name: None,
            organizer_email: None,
            location: None,
            meeting_url: None,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        self.attendee_phone.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_statuses_case_insensitively() {
        assert_eq!(BookingStatus::parse("ACCEPTED"), BookingStatus::Accepted);
        assert_eq!(BookingStatus::parse(" Confirmed "), BookingStatus::Confirmed);
        assert_eq!(BookingStatus::parse("upcoming"), BookingStatus::Upcoming);
        assert_eq!(
            BookingStatus::parse("cancelled"),
            BookingStatus::Other("cancelled".into())
        );
    }

    #[test]
    fn only_live_statuses_are_eligible() {
        assert!(BookingStatus::Accepted.is_live());
        assert!(BookingStatus::Confirmed.is_live());
        assert!(BookingStatus::Upcoming.is_live());
        assert!(!BookingStatus::Other("cancelled".into()).is_live());
        assert!(!BookingStatus::Other("rejected".into()).is_live());
    }

    #[test]
    fn an_empty_phone_counts_as_missing() {
        let mut booking = Booking::new("b1", 0, 0);
        assert!(booking.phone().is_none());
        booking.attendee_phone = Some("".into());
        assert!(booking.phone().is_none());
        booking.attendee_phone = Some("+5511999990000".into());
        assert_eq!(booking.phone(), Some("+5511999990000"));
    }
}
