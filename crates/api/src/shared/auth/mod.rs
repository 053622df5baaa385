use crate::error::ZeloError;
use actix_web::HttpRequest;
use zelo_reminder_infra::ZeloContext;

const CYCLE_SECRET_HEADER: &str = "zelo-cycle-secret";

/// Guards the manual cycle endpoint with the shared cycle secret.
pub fn protect_cycle_route(http_req: &HttpRequest, ctx: &ZeloContext) -> Result<(), ZeloError> {
    let secret = http_req
        .headers()
        .get(CYCLE_SECRET_HEADER)
        .and_then(|header| header.to_str().ok());

    match secret {
        Some(secret) if secret == ctx.config.cycle_secret => Ok(()),
        _ => Err(ZeloError::Unauthorized(format!(
            "Missing or invalid `{}` header",
            CYCLE_SECRET_HEADER
        ))),
    }
}
