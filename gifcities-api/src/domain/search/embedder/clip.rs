//! Embedder backed by a remote CLIP inference service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::search::traits::{Embedder, Result, SearchError};
use crate::domain::search::types::ModelSpec;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    pretrained: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Sends query text to a CLIP text encoder over HTTP.
///
/// The service is expected to accept `{"model", "pretrained", "text"}` and
/// answer with `{"embedding": [...]}`.
///
/// # Example
///
/// ```ignore
/// let spec = ModelSpec::new("ViT-B-32", "laion2b_s34b_b79k")?;
/// let embedder = ClipEmbedder::new(endpoint, spec, Duration::from_secs(10))?;
/// let vector = embedder.embed("spinning globe").await?;
/// ```
#[derive(Clone)]
pub struct ClipEmbedder {
    client: reqwest::Client,
    endpoint: Url,
    spec: ModelSpec,
}

impl ClipEmbedder {
    pub fn new(endpoint: Url, spec: ModelSpec, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::ConfigError(format!("embedding client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            spec,
        })
    }
}

#[async_trait]
impl Embedder for ClipEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbedRequest {
            model: self.spec.model(),
            pretrained: self.spec.pretrained(),
            text,
        };

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError::EmbeddingError(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SearchError::EmbeddingError(format!(
                "embedding service returned {}",
                resp.status()
            )));
        }

        let body = resp
            .json::<EmbedResponse>()
            .await
            .map_err(|e| SearchError::EmbeddingError(format!("bad embedding response: {e}")))?;

        if body.embedding.is_empty() {
            return Err(SearchError::EmbeddingError("No embedding in response".into()));
        }

        Ok(body.embedding)
    }

    fn model_spec(&self) -> &ModelSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/embed")).unwrap()
    }

    fn spec() -> ModelSpec {
        ModelSpec::new("ViT-B-32", "laion2b_s34b_b79k").unwrap()
    }

    #[tokio::test]
    async fn sends_model_identifiers_with_text() {
        let router = Router::new().route(
            "/embed",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "ViT-B-32");
                assert_eq!(body["pretrained"], "laion2b_s34b_b79k");
                assert_eq!(body["text"], "under construction");
                Json(json!({ "embedding": [3.0, 4.0] }))
            }),
        );
        let endpoint = serve(router).await;
        let embedder = ClipEmbedder::new(endpoint, spec(), Duration::from_secs(5)).unwrap();

        let vector = embedder.embed("under construction").await.unwrap();

        assert_eq!(vector, vec![3.0, 4.0]);
    }

    #[tokio::test]
    async fn error_status_is_an_embedding_error() {
        let router = Router::new().route(
            "/embed",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "loading model") }),
        );
        let endpoint = serve(router).await;
        let embedder = ClipEmbedder::new(endpoint, spec(), Duration::from_secs(5)).unwrap();

        let err = embedder.embed("anything").await.unwrap_err();

        assert!(matches!(err, SearchError::EmbeddingError(_)));
    }

    #[tokio::test]
    async fn empty_embedding_is_rejected() {
        let router = Router::new().route(
            "/embed",
            post(|| async { Json(json!({ "embedding": [] })) }),
        );
        let endpoint = serve(router).await;
        let embedder = ClipEmbedder::new(endpoint, spec(), Duration::from_secs(5)).unwrap();

        assert!(embedder.embed("anything").await.is_err());
    }
}
