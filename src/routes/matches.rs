use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{AnswerSet, ScoredMovie, UserAnswer},
    routes::AppState,
    services::matching,
};

/// Request body for match generation
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub user1_answers: Vec<UserAnswer>,
    pub user2_answers: Vec<UserAnswer>,
    #[serde(default)]
    pub seen_movie_ids: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub movies: Vec<ScoredMovie>,
    pub movie_count: usize,
}

/// Handler for the match generation endpoint
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<MatchRequest>,
) -> AppResult<Json<MatchResponse>> {
    tracing::info!(
        request_id = %request_id,
        user1_answers = request.user1_answers.len(),
        user2_answers = request.user2_answers.len(),
        seen_movies = request.seen_movie_ids.len(),
        "Processing match request"
    );

    let user1 = AnswerSet::from_answers(request.user1_answers);
    let user2 = AnswerSet::from_answers(request.user2_answers);

    let movies = matching::generate_matches(
        state.catalog.as_ref(),
        &state.questions,
        &user1,
        &user2,
        &request.seen_movie_ids,
        &state.watch_region,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        movies = movies.len(),
        "Match request completed"
    );

    let movie_count = movies.len();
    Ok(Json(MatchResponse {
        movies,
        movie_count,
    }))
}
