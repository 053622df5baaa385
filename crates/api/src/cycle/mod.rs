mod dispatch;
mod evaluate;
pub mod run_reminder_cycle;

use actix_web::web;
use run_reminder_cycle::run_reminder_cycle_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/cycle/run", web::post().to(run_reminder_cycle_controller));
}
