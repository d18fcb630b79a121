use std::sync::Arc;

use crate::config::cors::CorsConfig;
use crate::config::jwt::JwtConfig;
use crate::store::Store;
use crate::store::memory::MemStore;
use crate::store::postgres::PgStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &"JwtConfig { .. }")
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }

    /// State backed by the in-memory store, for tests and local runs.
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        Self::new(
            Arc::new(MemStore::new()),
            jwt_config,
            CorsConfig {
                allowed_origins: vec![],
            },
        )
    }
}

/// Builds the production state. Connects to PostgreSQL when `DATABASE_URL`
/// is set; otherwise falls back to the in-memory store, which loses all
/// data on restart.
pub async fn init_app_state() -> AppState {
    let jwt_config = JwtConfig::from_env();
    let cors_config = CorsConfig::from_env();

    let store: Arc<dyn Store> = if std::env::var("DATABASE_URL").is_ok() {
        let pool = crate::config::database::init_db_pool().await;
        Arc::new(PgStore::new(pool))
    } else {
        tracing::warn!("DATABASE_URL not set, using the in-memory store");
        Arc::new(MemStore::new())
    };

    AppState::new(store, jwt_config, cors_config)
}
