use std::path::Path;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::app_state::AppState;

/// Home, about, favicon and everything under `/static`.
pub fn router(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/about", ServeFile::new(static_dir.join("about.html")))
        .route("/favicon.ico", get(favicon))
        .nest_service("/static", ServeDir::new(static_dir))
}

async fn favicon() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "/static/favicon.ico")],
    )
}
