//! Logging and tracing setup

use crate::config::LoggingConfig;
use crate::error::{Result, RhoError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global tracing subscriber from `config`.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a global
/// subscriber is already installed.
pub fn initialize_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| RhoError::Logging(format!("invalid filter '{}': {}", config.level, e)))?;

    let fmt_layer = match config.format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        "pretty" => fmt::layer()
            .pretty()
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        "compact" => fmt::layer().compact().with_target(false).with_thread_ids(true).boxed(),
        other => return Err(RhoError::Logging(format!("unknown log format '{other}'"))),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| RhoError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_format() {
        let config = LoggingConfig { format: "xml".to_string(), ..Default::default() };
        assert!(matches!(initialize_logging(&config), Err(RhoError::Logging(_))));
    }
}
