//! Log configuration.

use std::str::FromStr;

use domain::Environment;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_ENV_CONFIG: &str = "warn,set_commit_status=info,source_control=info,domain=info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(
        "Could not set tracing global default subscriber,\n  caused by: {}",
        source
    )]
    TracingSetGlobalDefaultError {
        source: tracing::subscriber::SetGlobalDefaultError,
    },
    #[error(
        "Wrong env filter configuration: {}\n  caused by: {}",
        configuration,
        source
    )]
    EnvFilterConfigurationError {
        source: tracing_subscriber::filter::ParseError,
        configuration: String,
    },
}

/// Logs go to stderr, filtered by `RUST_LOG`.
pub fn configure_logging(environment: &impl Environment) -> Result<(), LoggingError> {
    let filter_layer = env_filter(environment)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_layer)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::TracingSetGlobalDefaultError { source: e })
}

fn env_filter(environment: &impl Environment) -> Result<EnvFilter, LoggingError> {
    let log_config = environment
        .non_empty("RUST_LOG")
        .unwrap_or_else(|| DEFAULT_ENV_CONFIG.to_owned());

    EnvFilter::from_str(&log_config).map_err(|e| LoggingError::EnvFilterConfigurationError {
        source: e,
        configuration: log_config,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn env_filter_should_accept_default_configuration() {
        assert!(env_filter(&HashMap::<String, String>::new()).is_ok());
    }

    #[test]
    fn env_filter_should_report_invalid_configuration() {
        let environment = HashMap::from([("RUST_LOG".to_owned(), "domain=loud".to_owned())]);

        assert!(matches!(
            env_filter(&environment),
            Err(LoggingError::EnvFilterConfigurationError { configuration, .. }) if configuration == "domain=loud"
        ));
    }
}
