mod base;
mod cycle;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use cycle::CycleClient;
pub use cycle::RunCycleInput;
use status::StatusClient;
use std::sync::Arc;
pub use zelo_reminder_api_structs::dtos::*;
pub use zelo_reminder_domain::ID;

// Domain
pub use zelo_reminder_api_structs::dtos::CycleCountersDTO as CycleCounters;
pub use zelo_reminder_api_structs::dtos::RunSummaryDTO as RunSummary;
pub use zelo_reminder_api_structs::dtos::TriggerRunDetailDTO as TriggerRunDetail;

/// Zelo Reminder Engine SDK
///
/// The SDK contains methods for interacting with the Zelo reminder engine
/// API.
#[derive(Clone)]
pub struct ZeloSDK {
    pub cycle: CycleClient,
    pub status: StatusClient,
}

impl ZeloSDK {
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        let base = Arc::new(base);
        let cycle = CycleClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { cycle, status }
    }
}
