use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};
use crate::models::Question;
use crate::services::providers::MovieCatalog;

pub mod matches;
pub mod movies;
pub mod questions;

/// Shared application state
///
/// The question catalog is loaded once at startup and immutable afterwards,
/// so handlers read it without locking.
pub struct AppState {
    pub questions: Vec<Question>,
    pub catalog: Arc<dyn MovieCatalog>,
    pub watch_region: String,
}

/// Creates the application router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", get(questions::list))
        .route("/match", post(matches::generate))
        .route("/movies/:movie_id", get(movies::detail))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
