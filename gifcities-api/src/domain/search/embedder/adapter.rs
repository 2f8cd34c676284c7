//! Query embedding with normalization and a bounded memo cache.

use std::sync::Arc;

use moka::future::Cache;

use crate::domain::search::traits::{Embedder, Result, SearchError};
use crate::domain::search::types::{EmbeddedQuery, ModelSpec};

/// Turns query text into unit-length vectors.
///
/// Results are cached per instance, keyed by the exact query text, so a
/// repeated query skips inference. Concurrent misses for the same text
/// share one inference call. The cache is bounded and evicts rarely used
/// entries once it reaches capacity.
#[derive(Clone)]
pub struct QueryEmbedder {
    embedder: Arc<dyn Embedder>,
    cache: Cache<String, Arc<Vec<f32>>>,
}

impl QueryEmbedder {
    pub fn new(embedder: Arc<dyn Embedder>, cache_capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(cache_capacity).build();
        Self { embedder, cache }
    }

    pub fn model_spec(&self) -> &ModelSpec {
        self.embedder.model_spec()
    }

    pub async fn embed_query(&self, text: &str) -> Result<EmbeddedQuery> {
        let vector = self
            .cache
            .try_get_with(text.to_string(), async {
                tracing::debug!(query = text, "embedding cache miss");
                let mut vector = self.embedder.embed(text).await?;
                l2_normalize(&mut vector);
                Ok::<_, SearchError>(Arc::new(vector))
            })
            .await
            .map_err(Arc::unwrap_or_clone)?;

        Ok(EmbeddedQuery {
            text: text.to_string(),
            vector: vector.as_ref().clone(),
        })
    }
}

/// Scale `vector` to unit length. A zero vector is left as is.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
