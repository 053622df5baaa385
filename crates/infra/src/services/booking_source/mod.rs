mod legacy_api;
mod normalize;
mod v2_api;

pub use normalize::normalize_booking;

use chrono::{TimeZone, Utc};
use legacy_api::LegacyBookingApi;
use std::time::Duration;
use tracing::warn;
use v2_api::V2BookingApi;
use zelo_reminder_domain::{Agent, Booking, CalendarApiVersion};

#[async_trait::async_trait]
pub trait IBookingSource: Send + Sync {
    /// Bookings of one event type whose start lands inside
    /// `[range_start, range_end]`, both in millis.
    async fn list_bookings(
        &self,
        agent: &Agent,
        event_type: &str,
        range_start: i64,
        range_end: i64,
    ) -> anyhow::Result<Vec<Booking>>;
}

/// Real booking source. Speaks both provider dialects, picks one per
/// agent and funnels either answer through the same normalizer.
pub struct CalendarBookingSource {
    legacy: LegacyBookingApi,
    v2: V2BookingApi,
}

impl CalendarBookingSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            legacy: LegacyBookingApi::new(timeout),
            v2: V2BookingApi::new(timeout),
        }
    }
}

#[async_trait::async_trait]
impl IBookingSource for CalendarBookingSource {
    async fn list_bookings(
        &self,
        agent: &Agent,
        event_type: &str,
        range_start: i64,
        range_end: i64,
    ) -> anyhow::Result<Vec<Booking>> {
        let credential = match agent.calendar.credential() {
            Some(credential) => credential,
            None => anyhow::bail!("Agent: {} has no calendar api key", agent.id),
        };
        let base_url = agent.calendar.base_url.as_deref();
        let records = match agent.calendar.version {
            CalendarApiVersion::Legacy => {
                self.legacy
                    .list_bookings(base_url, credential, event_type, range_start, range_end)
                    .await?
            }
            CalendarApiVersion::V2 => {
                self.v2
                    .list_bookings(base_url, credential, event_type, range_start, range_end)
                    .await?
            }
        };

        // Providers are loose about honoring the date range params, the
        // window is enforced here again on the normalized start.
        let mut bookings = Vec::new();
        for record in records {
            match normalize_booking(&record) {
                Some(booking) => {
                    if booking.start_ts >= range_start && booking.start_ts <= range_end {
                        bookings.push(booking);
                    }
                }
                None => warn!(
                    "Skipping booking record without uid or start time: {}",
                    record
                ),
            }
        }
        Ok(bookings)
    }
}

pub(crate) fn query_timestamp(timestamp_millis: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|parsed| parsed.to_rfc3339())
        .unwrap_or_default()
}
