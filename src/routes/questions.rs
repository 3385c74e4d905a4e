use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::Question;
use crate::routes::AppState;

/// Handler for the question catalog endpoint
///
/// Returns the seeded questions in display order so both users answer the
/// same catalog the scorer runs against.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Question>> {
    Json(state.questions.clone())
}
