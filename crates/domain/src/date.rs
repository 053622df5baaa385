use chrono::prelude::*;
use chrono_tz::Tz;

/// Zone used when a booking carries no usable time zone of its own.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// A timestamp rendered for humans in a concrete IANA zone, as it appears
/// in reminder messages and webhook payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedInstant {
    /// E.g. "21/08/2026 14:30"
    pub formatted: Option<String>,
    /// E.g. "21/08/2026"
    pub date: Option<String>,
    /// E.g. "14:30"
    pub time: Option<String>,
    /// E.g. "UTC-03:00"
    pub offset_label: Option<String>,
    /// The zone that was actually used.
    pub time_zone: Option<String>,
}

impl FormattedInstant {
    fn empty() -> Self {
        Self {
            formatted: None,
            date: None,
            time: None,
            offset_label: None,
            time_zone: None,
        }
    }
}

/// Renders `timestamp_millis` in `time_zone`, falling back to
/// [`DEFAULT_TIMEZONE`] when the zone is missing or unknown. Returns the
/// empty value instead of failing when the timestamp itself cannot be
/// represented.
pub fn format_instant(timestamp_millis: i64, time_zone: Option<&str>) -> FormattedInstant {
    let tz = time_zone
        .and_then(|name| name.parse::<Tz>().ok())
        .or_else(|| DEFAULT_TIMEZONE.parse::<Tz>().ok());
    let tz = match tz {
        Some(tz) => tz,
        None => return FormattedInstant::empty(),
    };
    let utc = match Utc.timestamp_millis_opt(timestamp_millis).single() {
        Some(utc) => utc,
        None => return FormattedInstant::empty(),
    };

    let local = utc.with_timezone(&tz);
    let offset_seconds = local.offset().fix().local_minus_utc();

    FormattedInstant {
        formatted: Some(local.format("%d/%m/%Y %H:%M").to_string()),
        date: Some(local.format("%d/%m/%Y").to_string()),
        time: Some(local.format("%H:%M").to_string()),
        offset_label: Some(offset_label(offset_seconds)),
        time_zone: Some(tz.name().to_string()),
    }
}

fn offset_label(offset_seconds: i32) -> String {
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.abs();
    format!("UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}
