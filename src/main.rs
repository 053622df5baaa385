mod telemetry;

use telemetry::{get_subscriber, init_subscriber};
use zelo_reminder_api::Application;
use zelo_reminder_infra::setup_context;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("zelo_reminder_server".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
