use crate::core::state::AppState;
use crate::handlers::{
    health::health_handler,
    peers::{peer_handler, refresh_handler, sort_handler, table_handler},
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/peers", get(table_handler))
        .route("/peers/sort", post(sort_handler))
        .route("/peers/refresh", post(refresh_handler))
        .route("/peers/{node_id}", get(peer_handler))
        .with_state(state)
}
