use super::query_timestamp;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::error;

const API_BASE_URL: &str = "https://api.cal.com/v2";
const API_VERSION_HEADER: &str = "cal-api-version";
const API_VERSION: &str = "2024-08-13";

/// Bearer token dialect. Wants a version header on every call and wraps
/// the booking list in a `data` field.
pub struct V2BookingApi {
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct V2BookingsResponse {
    #[serde(default)]
    data: Vec<Value>,
}

impl V2BookingApi {
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
            .header("authorization", format!("Bearer {}", api_key))
            .header(API_VERSION_HEADER, API_VERSION)
            .query(&[
                ("eventTypeId", event_type.to_string()),
                ("afterStart", query_timestamp(range_start)),
                ("beforeEnd", query_timestamp(range_end)),
            ])
            .send()
            .await
        {
            Ok(res) => {
                if !res.status().is_success() {
                    error!(
                        "[Unexpected Response] V2 booking api returned status: {}",
                        res.status()
                    );
                    anyhow::bail!("Booking query failed with status: {}", res.status());
                }
                res.json::<V2BookingsResponse>()
                    .await
                    .map(|body| body.data)
                    .map_err(|e| {
                        error!(
                            "[Unexpected Response] V2 booking api error. Error message: {:?}",
                            e
                        );
                        anyhow::Error::new(e)
                    })
            }
            Err(e) => {
                error!(
                    "[Network Error] V2 booking api error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}
