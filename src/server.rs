//! HTTP server wiring: router, middleware, listener.

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::advisor::{AdvisorRouteState, advisor_routes};
use crate::config::AdvisorConfig;
use crate::error::{ConfigError, Result};
use crate::languages::Language;
use crate::sentiment::create_analyzer;

/// Build the full application router from configuration.
pub fn app(config: &AdvisorConfig) -> Result<Router> {
    let default_language = Language::lookup(&config.default_language).ok_or_else(|| {
        ConfigError::InvalidValue {
            key: "LOAN_ADVISOR_DEFAULT_LANGUAGE".to_string(),
            message: format!("unsupported language {:?}", config.default_language),
        }
    })?;

    let state = AdvisorRouteState::new(create_analyzer(config.sentiment.as_ref()), default_language);

    // The chat widget is embedded on other origins.
    Ok(advisor_routes(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()))
}

/// Bind the listener and serve until the process is stopped.
pub async fn run(config: &AdvisorConfig) -> Result<()> {
    let app = app(config)?;
    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "Loan advisor listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn unknown_default_language_is_config_error() {
        let config = AdvisorConfig {
            default_language: "klingon".to_string(),
            ..Default::default()
        };
        assert!(matches!(app(&config), Err(Error::Config(ConfigError::InvalidValue { .. }))));
    }

    #[test]
    fn default_config_builds() {
        assert!(app(&AdvisorConfig::default()).is_ok());
    }
}
