//! Structured logging.
//!
//! `RUST_LOG` takes precedence over the configured level so a single run can
//! be made noisier without touching the config file.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build the filter used by the subscriber.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(format!("wallet_demo={0},{0}", config.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Install the global tracing subscriber.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(config: &ObservabilityConfig) {
    let filter = build_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_level_falls_back() {
        let config = ObservabilityConfig {
            log_level: "not[a level".to_string(),
            ..ObservabilityConfig::default()
        };
        // Must not panic.
        let _ = build_filter(&config);
    }

    #[test]
    fn test_init_twice() {
        let config = ObservabilityConfig::default();
        init(&config);
        init(&config);
    }
}
