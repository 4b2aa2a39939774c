use std::sync::Arc;

use medref_config::{CorsConfig, GuardConfig, JwtConfig, ServerConfig};
use medref_core::{AccessPolicy, ConfigurationError};
use medref_observability::{PrometheusHandle, init_metrics};

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub policy: Arc<AccessPolicy>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(jwt_config: JwtConfig, cors_config: CorsConfig, policy: AccessPolicy) -> Self {
        Self {
            jwt_config,
            cors_config,
            policy: Arc::new(policy),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

/// Builds the state from the environment. Fails if the access policy is
/// inconsistent; the server must not start with a broken policy.
pub fn init_app_state(server_config: &ServerConfig) -> Result<AppState, ConfigurationError> {
    let policy = GuardConfig::from_env().build_policy()?;

    Ok(
        AppState::new(JwtConfig::from_env(), CorsConfig::from_env(), policy)
            .with_metrics(init_metrics(server_config.metrics_enabled)),
    )
}
