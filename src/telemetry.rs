use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ErrorTrackingConfig;

const DEFAULT_FILTER: &str = "devsys_backend=debug,tower_http=debug";

/// Start Sentry when enabled with a usable DSN
fn init_error_tracking(config: &ErrorTrackingConfig) -> Result<Option<sentry::ClientInitGuard>> {
    if !config.enabled {
        return Ok(None);
    }
    let dsn = config.dsn.as_deref().context("SENTRY_DSN is not set")?;
    let dsn: sentry::types::Dsn = dsn.parse().context("invalid SENTRY_DSN")?;

    let guard = sentry::init(sentry::ClientOptions {
        dsn: Some(dsn),
        release: sentry::release_name!(),
        traces_sample_rate: 1.0,
        ..Default::default()
    });
    Ok(Some(guard))
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process so buffered error events get flushed.
pub fn init(config: &ErrorTrackingConfig) -> Option<sentry::ClientInitGuard> {
    let tracking = init_error_tracking(config);
    let sentry_layer =
        matches!(tracking, Ok(Some(_))).then(|| sentry::integrations::tracing::layer());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_layer)
        .init();

    match tracking {
        Ok(Some(guard)) => {
            info!("Sentry Enabled");
            Some(guard)
        }
        Ok(None) => {
            warn!("Sentry is disabled. Set SENTRY_ENABLED=true in .env to activate it.");
            None
        }
        Err(e) => {
            warn!("Sentry is disabled: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_tracking_starts_nothing() {
        let config = ErrorTrackingConfig::from_values(Some("false"), Some("not checked".into()));
        assert!(init_error_tracking(&config).unwrap().is_none());
    }

    #[test]
    fn enabled_without_dsn_is_refused() {
        let config = ErrorTrackingConfig::from_values(Some("true"), None);
        let err = init_error_tracking(&config).err().unwrap();
        assert!(err.to_string().contains("SENTRY_DSN is not set"));
    }

    #[test]
    fn enabled_with_malformed_dsn_is_refused() {
        let config = ErrorTrackingConfig::from_values(Some("true"), Some("not-a-dsn".into()));
        let err = init_error_tracking(&config).err().unwrap();
        assert!(err.to_string().contains("invalid SENTRY_DSN"));
    }
}
