use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt::time::UtcTime, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app_state::AppState,
    domain::search::{ClipEmbedder, ElasticsearchIndex, QueryEmbedder, SearchService},
};

mod app_state;
mod config;
mod domain;
mod router;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gifcities_api=debug,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_timer(UtcTime::rfc_3339()))
        .init();

    let settings = config::read_config().context("Failed to read configuration")?;

    let model_spec = settings
        .embedding
        .model_spec()
        .context("Invalid embedding model configuration")?;
    let clip = ClipEmbedder::new(
        settings.embedding.url.clone(),
        model_spec,
        settings.embedding.timeout(),
    )?;
    let embedder = QueryEmbedder::new(Arc::new(clip), settings.embedding.cache_capacity);

    let index = ElasticsearchIndex::new(
        &settings.elasticsearch.url,
        &settings.elasticsearch.index,
        settings.elasticsearch.timeout(),
        settings.elasticsearch.credentials(),
    )?;

    tracing::info!(
        index = %settings.elasticsearch.index,
        model = %embedder.model_spec(),
        "search clients ready"
    );

    let service = SearchService::new(Arc::new(index), embedder, settings.search.clone());
    let app = router::create(AppState::new(service), &settings.application.static_dir);

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
