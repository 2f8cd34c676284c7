//! Search service combining query embedding, the index and result shaping.

use std::sync::Arc;

use serde::Deserialize;

use super::embedder::QueryEmbedder;
use super::params::RawSearchParams;
use super::projector::{mismatched_model_tags, project_page};
use super::query::{detail_body, search_body};
use super::traits::{GifIndex, Result, SearchError};
use super::types::{GifSource, SearchPage, SearchParams};

/// Gif checksums are always this many characters.
pub const CHECKSUM_LEN: usize = 32;

/// Configuration for the search service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size when none (or garbage) is requested
    pub default_page_size: u64,
    /// Largest page size a caller can ask for
    pub max_page_size: u64,
    /// Safety threshold when none is requested
    pub default_mnsfw: f32,
    /// Nearest neighbours fetched per vector query
    pub knn_k: u64,
    /// Candidates considered per shard for each vector query
    pub knn_num_candidates: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 50,
            default_mnsfw: 0.5,
            knn_k: 100,
            knn_num_candidates: 1000,
        }
    }
}

/// Runs searches and detail lookups against the gif index.
///
/// # Examples
///
/// ```ignore
/// let embedder = QueryEmbedder::new(Arc::new(clip), 1024);
/// let service = SearchService::new(Arc::new(index), embedder, SearchConfig::default());
/// let page = service.search(&raw_params).await?;
/// ```
pub struct SearchService {
    index: Arc<dyn GifIndex>,
    embedder: QueryEmbedder,
    config: SearchConfig,
}

impl SearchService {
    pub fn new(index: Arc<dyn GifIndex>, embedder: QueryEmbedder, config: SearchConfig) -> Self {
        Self {
            index,
            embedder,
            config,
        }
    }

    /// Coerce raw request parameters and run the search.
    pub async fn search(&self, raw: &RawSearchParams) -> Result<SearchPage> {
        let params = raw.coerce(&self.config)?;
        self.search_with(&params).await
    }

    /// Run a search with already validated parameters.
    pub async fn search_with(&self, params: &SearchParams) -> Result<SearchPage> {
        let embedding = if params.flavor.needs_embedding() {
            Some(self.embedder.embed_query(&params.q).await?)
        } else {
            None
        };

        let body = search_body(params, embedding.as_ref(), &self.config)?;
        let hits = self.index.search(&body).await?;

        if params.flavor.needs_embedding() {
            let spec = self.embedder.model_spec();
            for tag in mismatched_model_tags(&hits.hits, spec) {
                tracing::warn!(
                    index_model = %tag,
                    runtime_model = %spec,
                    "embedding model mismatch between index and query embedder"
                );
            }
        }

        tracing::debug!(
            q = %params.q,
            flavor = %params.flavor,
            total = hits.total,
            returned = hits.hits.len(),
            "search complete"
        );

        Ok(project_page(params, hits))
    }

    /// Fetch one gif with all of its uses.
    ///
    /// The checksum length is checked before the index is queried.
    pub async fn gif_detail(&self, checksum: &str) -> Result<GifSource> {
        let len = checksum.chars().count();
        if len != CHECKSUM_LEN {
            return Err(SearchError::InvalidChecksum(len));
        }

        let hits = self.index.search(&detail_body(checksum)).await?;

        hits.hits
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::NotFound(checksum.to_string()))
    }
}
