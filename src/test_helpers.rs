use std::sync::Arc;

use axum::{Router, middleware};
use sea_orm::DatabaseConnection;

use crate::{
    config::AppConfig,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    state::AppState,
};

/// Full router with the production middleware stack over `db`, usually a
/// `sea_orm::MockDatabase` connection.
pub fn test_router(db: DatabaseConnection) -> Router {
    let state = AppState::new(AppConfig::default(), db);
    router(Arc::clone(&state))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
}
