use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(cfg.connect_timeout())
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!(
        max_connections = cfg.max_connections,
        min_idle = cfg.min_idle,
        "database pool ready"
    );

    if cfg.sync_schema {
        info!("syncing todos table from entities");
        db.get_schema_registry("todo_api::db::entities::*")
            .sync(&db)
            .await?;
    }
    Ok(db)
}

/// Releases every pooled connection. Called once the server has stopped.
pub async fn disconnect(db: DatabaseConnection) -> anyhow::Result<()> {
    db.close().await?;
    info!("database pool closed");
    Ok(())
}
