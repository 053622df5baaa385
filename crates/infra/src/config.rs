use std::time::Duration;
use tracing::{info, warn};
use zelo_reminder_domain::WindowPolicy;
use zelo_reminder_utils::create_random_secret;

#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret required by the manual cycle trigger route
    pub cycle_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// Durations steering the due decision for every trigger. The booking
    /// query window and the too-old / too-recent cutoffs all derive from
    /// these values.
    pub window: WindowPolicy,
    /// Upper bound for a single outbound delivery call. A call that runs
    /// past it counts as a failed delivery.
    pub delivery_timeout: Duration,
    /// Bounds in millis for the randomized delay applied before each
    /// gateway send so messages do not go out in a burst.
    pub send_delay_min_millis: u64,
    pub send_delay_max_millis: u64,
}

impl Config {
    pub fn new() -> Self {
        let cycle_secret = match std::env::var("CYCLE_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find CYCLE_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(16);
                info!(
                    "Secret for triggering reminder cycles was generated and set to: {}",
                    secret
                );
                secret
            }
        };
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        let window = WindowPolicy {
            tolerance: parse_env_i64("REMINDER_TOLERANCE_MINS", 5).max(0) * 60 * 1000,
            max_lookback: parse_env_i64("REMINDER_LOOKBACK_HOURS", 12).max(0) * 60 * 60 * 1000,
            grace_window: parse_env_i64("REMINDER_GRACE_MINS", 5).max(0) * 60 * 1000,
        };
        let delivery_timeout =
            Duration::from_secs(parse_env_i64("DELIVERY_TIMEOUT_SECS", 10).max(1) as u64);
        let send_delay_min_millis =
            parse_env_i64("REMINDER_SEND_DELAY_MIN_SECS", 5).max(0) as u64 * 1000;
        let send_delay_max_millis =
            parse_env_i64("REMINDER_SEND_DELAY_MAX_SECS", 15).max(0) as u64 * 1000;

        Self {
            cycle_secret,
            port,
            window,
            delivery_timeout,
            send_delay_min_millis,
            send_delay_max_millis,
        }
    }
}

fn parse_env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(value) => match value.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
