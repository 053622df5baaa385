use std::sync::Arc;

use zelo_reminder_api::Application;
use zelo_reminder_infra::{setup_context, Config, ZeloContext};
use zelo_reminder_sdk::ZeloSDK;

use super::fakes::{FakeBookingSource, FakeMessageGateway, FakeWebhookSink, StaticTimeSys};

pub struct TestApp {
    pub config: Config,
    pub ctx: ZeloContext,
    pub sys: Arc<StaticTimeSys>,
    pub bookings: Arc<FakeBookingSource>,
    pub webhooks: Arc<FakeWebhookSink>,
    pub messages: Arc<FakeMessageGateway>,
}

// Launch the application as a background task with a frozen clock and
// recording fakes behind every outbound port
pub async fn spawn_app(now: i64) -> (TestApp, ZeloSDK, String) {
    let mut ctx = setup_context().await;
    ctx.config.port = 0; // Random port
    ctx.config.send_delay_min_millis = 0;
    ctx.config.send_delay_max_millis = 0;

    let sys = Arc::new(StaticTimeSys::new(now));
    ctx.sys = sys.clone();

    let bookings = Arc::new(FakeBookingSource::default());
    let webhooks = Arc::new(FakeWebhookSink::default());
    let messages = Arc::new(FakeMessageGateway::default());
    ctx.services.bookings = bookings.clone();
    ctx.services.webhooks = webhooks.clone();
    ctx.services.messages = messages.clone();

    let config = ctx.config.clone();
    let test_ctx = ctx.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        ctx: test_ctx,
        sys,
        bookings,
        webhooks,
        messages,
    };
    let sdk = ZeloSDK::new(address.clone(), "");
    (app, sdk, address)
}
