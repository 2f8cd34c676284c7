use std::path::Path;

use axum::{http::Method, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, routes};

pub fn create(app_state: AppState, static_dir: &Path) -> Router<()> {
    let app = Router::new()
        .nest("/search", routes::search::router())
        .merge(routes::gifs::router())
        .merge(routes::pages::router(static_dir));

    // Read-only API, so any origin may call it
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    app.with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
