use super::evaluate::{process_trigger, RunCaches};
use crate::error::ZeloError;
use crate::shared::auth::protect_cycle_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::warn;
use zelo_reminder_api_structs::run_reminder_cycle::{APIResponse, RequestBody};
use zelo_reminder_domain::{CycleCounters, RunLogEntry, RunSummary};
use zelo_reminder_infra::ZeloContext;

pub async fn run_reminder_cycle_controller(
    http_req: HttpRequest,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<ZeloContext>,
) -> Result<HttpResponse, ZeloError> {
    protect_cycle_route(&http_req, &ctx)?;

    let usecase = RunReminderCycleUseCase {
        dry_run: body_params.0.dry_run,
    };

    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(APIResponse::new(summary)))
        .map_err(ZeloError::from)
}

#[derive(Debug)]
pub struct RunReminderCycleUseCase {
    pub dry_run: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    Storage(String),
}

impl From<UseCaseError> for ZeloError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Storage(_) => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunReminderCycleUseCase {
    type Response = RunSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "RunReminderCycle";

    async fn execute(&mut self, ctx: &ZeloContext) -> Result<Self::Response, Self::Error> {
        let started_at = ctx.sys.get_timestamp_millis();
        let mut run_log = RunLogEntry::open(started_at);

        // The run log is observability only, a failure to open it must
        // not stop reminders from going out.
        let run_log_opened = match ctx.repos.run_log_repo.insert(&run_log).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Failed to open run log entry. Error: {:?}", e);
                false
            }
        };

        let triggers = match ctx.repos.trigger_repo.find_all_active().await {
            Ok(triggers) => triggers,
            Err(e) => {
                let message = format!("Failed to list active triggers: {}", e);
                if run_log_opened {
                    run_log.error = Some(message.clone());
                    finalize_run_log(ctx, run_log, started_at, false).await;
                }
                return Err(UseCaseError::Storage(message));
            }
        };

        let mut counters = CycleCounters {
            triggers_total: triggers.len(),
            ..Default::default()
        };
        let mut details = Vec::with_capacity(triggers.len());
        let mut caches = RunCaches::new();

        for trigger in &triggers {
            let detail =
                process_trigger(ctx, &mut caches, trigger, &mut counters, self.dry_run).await;
            details.push(detail);
        }

        let summary = RunSummary {
            dry_run: self.dry_run,
            counters: counters.clone(),
            details: details.clone(),
        };

        if run_log_opened {
            run_log.counters = counters;
            run_log.details = details;
            finalize_run_log(ctx, run_log, started_at, true).await;
        }

        Ok(summary)
    }
}

async fn finalize_run_log(
    ctx: &ZeloContext,
    mut run_log: RunLogEntry,
    started_at: i64,
    success: bool,
) {
    let finished_at = ctx.sys.get_timestamp_millis();
    run_log.finished_at = Some(finished_at);
    run_log.duration_millis = Some(finished_at - started_at);
    run_log.success = Some(success);
    if let Err(e) = ctx.repos.run_log_repo.patch(&run_log).await {
        warn!("Failed to finalize run log entry. Error: {:?}", e);
    }
}
