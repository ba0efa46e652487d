use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tower_sessions::{cookie::time::Duration, Expiry, MemoryStore, SessionManagerLayer};

use super::handlers::{calculate, health, index, schedule, upload_csv, upload_workbook};
use crate::services::{config::AppConfig, shared::constants::SESSION_INACTIVITY_MINUTES};

pub fn create_router(config: AppConfig) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        // idle sessions lapse, uploads included
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            SESSION_INACTIVITY_MINUTES,
        )));

    let page_routes = Router::new()
        .route("/", get(index))
        .route("/upload/csv", post(upload_csv))
        .route("/upload/workbook", post(upload_workbook))
        .route("/calculate", post(calculate))
        .layer(session_layer);

    let api_routes = Router::new().route("/schedule", get(schedule));

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .merge(page_routes)
        .nest("/api", api_routes.layer(cors_layer))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}
