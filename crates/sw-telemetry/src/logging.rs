//! Structured logging.
//!
//! Every line carries the same base fields so the background log can be
//! filtered per component:
//! - `env`: service label (always `service_worker` unless overridden)
//! - `component`: `offscreen`, `dispatch`, `runtime`
//! - `request_id`: correlation id for dispatched requests

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set or the level filter does not
/// parse.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Filter(e.to_string()))?;

    let json_layer = (config.console_output && config.json_logs).then(|| {
        fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_writer(std::io::stderr)
    });

    let text_layer = (config.console_output && !config.json_logs).then(|| {
        fmt::layer()
            .with_target(config.with_target)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::debug!(
        env = %config.service_name,
        json_logs = config.json_logs,
        "Logging initialized"
    );

    Ok(())
}

/// Root span carrying the `env` label.
///
/// Futures instrumented with this span tag every event they emit.
pub fn root_span(config: &TelemetryConfig) -> tracing::Span {
    tracing::info_span!("background", env = %config.service_name)
}

/// Helper to create structured log entries with a `component` field.
#[macro_export]
macro_rules! log_event {
    (info, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (error, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_filter_rejected() {
        let config = TelemetryConfig {
            log_level: "info,sw_runtime=notalevel".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::Filter(_))
        ));
    }

    #[test]
    fn test_log_event_macro_expands() {
        log_event!(info, "runtime", "macro smoke test", attempt = 1);
        log_event!(debug, "runtime", "no extra fields");
    }
}
