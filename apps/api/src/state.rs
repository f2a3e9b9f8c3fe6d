use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::recommend::Recommender;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// The scorer chain. Built once at startup from the provider config.
    pub recommender: Arc<Recommender>,
}
