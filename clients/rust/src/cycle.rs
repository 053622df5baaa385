use crate::base::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use zelo_reminder_api_structs::*;

#[derive(Clone)]
pub struct CycleClient {
    base: Arc<BaseClient>,
}

pub struct RunCycleInput {
    pub dry_run: bool,
}

impl CycleClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn run(&self, input: RunCycleInput) -> APIResponse<run_reminder_cycle::APIResponse> {
        let body = run_reminder_cycle::RequestBody {
            dry_run: input.dry_run,
        };
        self.base.post(body, "cycle/run".into(), StatusCode::OK).await
    }
}
