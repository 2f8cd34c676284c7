use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::search::{GifSource, SearchError},
};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/gifs/", get(missing_checksum))
        .route("/gifs/:checksum", get(get_gif))
}

/// An empty checksum is a bad request like any other wrong length.
async fn missing_checksum() -> ApiError {
    SearchError::InvalidChecksum(0).into()
}

#[instrument(name = "GET /gifs/:checksum", skip(app_state))]
async fn get_gif(
    State(app_state): State<AppState>,
    Path(checksum): Path<String>,
) -> Result<Json<GifSource>, ApiError> {
    let gif = app_state.search_service().gif_detail(&checksum).await?;
    Ok(Json(gif))
}
