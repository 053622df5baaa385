use crate::dtos::RunSummaryDTO;
use serde::{Deserialize, Serialize};

pub mod run_reminder_cycle {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub dry_run: bool,
    }

    pub type APIResponse = RunSummaryDTO;
}
