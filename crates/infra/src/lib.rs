mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::Repos;
pub use services::*;
use std::sync::Arc;
use tracing::info;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct ZeloContext {
    pub repos: Repos,
    pub services: Services,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl ZeloContext {
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let services = Services::create(config.delivery_timeout);
        Self {
            repos: Repos::create_inmemory(),
            services,
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    fn create_store(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let config = Config::new();
        let services = Services::create(config.delivery_timeout);
        Ok(Self {
            repos: Repos::create_store(base_url, api_key)?,
            services,
            config,
            sys: Arc::new(RealSys {}),
        })
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> ZeloContext {
    const STORE_BASE_URL: &str = "STORE_BASE_URL";
    const STORE_API_KEY: &str = "STORE_API_KEY";

    match (std::env::var(STORE_BASE_URL), std::env::var(STORE_API_KEY)) {
        (Ok(base_url), Ok(api_key)) => {
            info!("Using store repositories at: {}", base_url);
            ZeloContext::create_store(&base_url, &api_key)
                .expect("Store credentials must be set and valid")
        }
        _ => {
            info!(
                "{} or {} env var not present. Using inmemory repositories",
                STORE_BASE_URL, STORE_API_KEY
            );
            ZeloContext::create_inmemory()
        }
    }
}
