//! Trait definitions for search domain abstractions.
//!
//! These traits enable dependency injection and easy testing through mocking.

use async_trait::async_trait;
use serde_json::Value;

use super::types::{GifSource, ModelSpec};

/// Error type for search operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    #[error("unsupported search flavor '{0}'")]
    InvalidFlavor(String),

    #[error("checksum must be exactly 32 characters, got {0}")]
    InvalidChecksum(usize),

    #[error("no gif found with checksum {0}")]
    NotFound(String),

    #[error("Embedding generation failed: {0}")]
    EmbeddingError(String),

    #[error("Search index error: {0}")]
    IndexError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::IndexError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Trait for text embedding generation.
///
/// Abstracts the embedding provider so the query adapter can be tested
/// without a running model.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Run the model on a single text. Output is not normalized.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Model architecture and pretrained weights this embedder runs.
    fn model_spec(&self) -> &ModelSpec;
}

/// Hits returned by the search index for one request.
#[derive(Debug, Clone, Default)]
pub struct IndexHits {
    /// Total number of matching documents reported by the index.
    pub total: u64,
    /// Document sources in index order.
    pub hits: Vec<GifSource>,
}

/// Trait for the external search index.
///
/// Takes a fully composed request body so the query shape stays in the
/// domain and adapters only handle transport.
#[async_trait]
pub trait GifIndex: Send + Sync {
    async fn search(&self, body: &Value) -> Result<IndexHits>;
}
