use super::query_timestamp;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::error;

const API_BASE_URL: &str = "https://api.cal.com/v1";

/// Key based dialect. The credential travels as an `apiKey` query param
/// and the booking list comes wrapped in a `bookings` field.
pub struct LegacyBookingApi {
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct LegacyBookingsResponse {
    #[serde(default)]
    bookings: Vec<Value>,
}

impl LegacyBookingApi {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub async fn list_bookings(
        &self,
        base_url: Option<&str>,
        api_key: &str,
        event_type: &str,
        range_start: i64,
        range_end: i64,
    ) -> anyhow::Result<Vec<Value>> {
        let base_url = base_url.unwrap_or(API_BASE_URL).trim_end_matches('/');
        match self
            .client
            .get(&format!("{}/bookings", base_url))
            .timeout(self.timeout)
            .query(&[
                ("apiKey", api_key.to_string()),
                ("eventTypeId", event_type.to_string()),
                ("dateFrom", query_timestamp(range_start)),
                ("dateTo", query_timestamp(range_end)),
            ])
            .send()
            .await
        {
            Ok(res) => {
                if !res.status().is_success() {
                    error!(
                        "[Unexpected Response] Legacy booking api returned status: {}",
                        res.status()
                    );
                    anyhow::bail!("Booking query failed with status: {}", res.status());
                }
                res.json::<LegacyBookingsResponse>()
                    .await
                    .map(|body| body.bookings)
                    .map_err(|e| {
                        error!(
                            "[Unexpected Response] Legacy booking api error. Error message: {:?}",
                            e
                        );
                        anyhow::Error::new(e)
                    })
            }
            Err(e) => {
                error!(
                    "[Network Error] Legacy booking api error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}
