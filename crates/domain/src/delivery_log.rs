use crate::shared::entity::ID;

/// Stored delivery responses are truncated. Bodies can be arbitrarily
/// large error pages.
pub const MAX_STORED_RESPONSE_LEN: usize = 512;

pub fn truncate_response(body: &str) -> String {
    body.chars().take(MAX_STORED_RESPONSE_LEN).collect()
}

/// One row of the delivery ledger. The pair (`trigger_id`, `booking_uid`)
/// is the deduplication key: a pair that has an entry is never dispatched
/// again, whether or not the recorded attempt succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryLogEntry {
    pub trigger_id: ID,
    pub booking_uid: String,
    /// Instant the reminder was supposed to go out.
    pub scheduled_for: i64,
    /// Instant the attempt actually ran.
    pub executed_at: i64,
    pub success: bool,
    /// Status code returned by the webhook sink or messaging gateway.
    pub status_code: Option<i32>,
    pub response: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_truncates_long_responses() {
        let body = "x".repeat(10_000);
        assert_eq!(truncate_response(&body).len(), MAX_STORED_RESPONSE_LEN);
        assert_eq!(truncate_response("short"), "short");
    }
}
