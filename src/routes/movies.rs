use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::MovieDetail,
    routes::AppState,
};

/// Handler for the movie detail endpoint
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<MovieDetail>> {
    if movie_id == 0 {
        return Err(AppError::InvalidInput(
            "Movie id must be positive".to_string(),
        ));
    }

    let detail = state.catalog.movie_detail(movie_id).await?;
    Ok(Json(detail))
}
