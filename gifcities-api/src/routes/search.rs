use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::search::{RawSearchParams, SearchPage},
};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search))
}

/// Every parameter is taken as a raw pair so malformed numbers and repeated
/// keys fall back to defaults instead of rejecting the request.
#[instrument(name = "GET /search", skip(app_state))]
async fn search(
    State(app_state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchPage>, ApiError> {
    let query = RawSearchParams::from_pairs(pairs);
    let page = app_state.search_service().search(&query).await?;
    Ok(Json(page))
}
