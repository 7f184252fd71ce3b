use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Process-wide resources handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { config, db })
    }
}
