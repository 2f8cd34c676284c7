//! GifCities search - lexical, semantic and hybrid search over archived gifs.
//!
//! The index and the embedding model are external services; this module
//! shapes requests for them and results from them.
//!
//! # Architecture
//!
//! - `Embedder` - Text embedding generation (remote CLIP, mocks)
//! - `GifIndex` - Search index transport (Elasticsearch, mocks)
//! - [`QueryEmbedder`] - Normalization and bounded memoization of query vectors
//! - [`SearchService`] - Parameter coercion, query building, result projection
//!
//! # Example
//!
//! ```ignore
//! let index = ElasticsearchIndex::new(&es_url, "gifcities", timeout, None)?;
//! let clip = ClipEmbedder::new(embed_url, ModelSpec::new("ViT-B-32", "laion2b_s34b_b79k")?, timeout)?;
//! let service = SearchService::new(
//!     Arc::new(index),
//!     QueryEmbedder::new(Arc::new(clip), 1024),
//!     SearchConfig::default(),
//! );
//!
//! let page = service.search(&raw_params).await?;
//! ```
//!
//! # Flavors
//!
//! - `lexical` - filename (weight 3) and path match, most used first
//! - `semantic` - k-nearest-neighbour over image embeddings
//! - `hybrid` - both, scored together by the index
//!
//! Every flavor drops results whose `mnsfw` score is above the threshold.

mod params;
mod projector;
mod query;
mod service;
mod traits;
mod types;

pub mod embedder;
pub mod index;

pub use embedder::{ClipEmbedder, QueryEmbedder};
pub use index::{ElasticsearchIndex, IndexCredentials};
pub use params::RawSearchParams;
pub use service::{SearchConfig, SearchService};
pub use traits::SearchError;
pub use types::{GifSource, ModelSpec, SearchPage};
