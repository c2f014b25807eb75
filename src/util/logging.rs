//! Logging initialization and configuration.

use crate::config::LogFormat;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the log filter. `RUST_LOG` takes precedence over `level`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the logging system.
///
/// # Arguments
///
/// * `level` - Log level filter (e.g., "info", "debug")
/// * `format` - Log output format (json or pretty)
pub fn init_logging(level: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(build_filter(level));

    match format {
        LogFormat::Json => {
            registry.with(fmt::layer().json()).init();
        }
        LogFormat::Pretty => {
            registry.with(fmt::layer().pretty()).init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // init_logging installs a global subscriber, so only the filter is tested.
    #[test]
    fn test_build_filter_uses_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(
            build_filter("debug").max_level_hint(),
            Some(tracing_subscriber::filter::LevelFilter::DEBUG)
        );
    }
}
