//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use chrono::Duration;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::security::LoginRateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    /// Limiter de intentos de login, compartido entre requests.
    /// `check_limit` hace check-then-increment no atómico, por eso vive
    /// detrás de un lock de escritura.
    pub login_limiter: Arc<RwLock<LoginRateLimiter>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let limiter = LoginRateLimiter::new(
            config.login_max_attempts,
            Duration::minutes(config.login_window_minutes),
        );

        Self {
            pool,
            config,
            login_limiter: Arc::new(RwLock::new(limiter)),
        }
    }
}
