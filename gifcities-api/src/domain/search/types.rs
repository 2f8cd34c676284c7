//! Core types for the search domain.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::traits::{Result, SearchError};

/// How the search text is matched against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
pub enum SearchFlavor {
    /// Keyword match against use filenames and paths.
    #[default]
    #[strum(ascii_case_insensitive, serialize = "lexical")]
    Lexical,
    /// Nearest-neighbour match against image embeddings.
    #[strum(ascii_case_insensitive, serialize = "semantic")]
    Semantic,
    /// Both of the above in a single request.
    #[strum(ascii_case_insensitive, serialize = "hybrid")]
    Hybrid,
}

impl SearchFlavor {
    /// Whether this flavor needs a query embedding.
    pub fn needs_embedding(self) -> bool {
        matches!(self, SearchFlavor::Semantic | SearchFlavor::Hybrid)
    }
}

/// Identifies the embedding model: architecture plus pretrained weight set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelSpec {
    model: String,
    pretrained: String,
}

impl ModelSpec {
    /// Both identifiers are required.
    pub fn new(model: impl Into<String>, pretrained: impl Into<String>) -> Result<Self> {
        let model = model.into().trim().to_string();
        let pretrained = pretrained.into().trim().to_string();

        if model.is_empty() {
            return Err(SearchError::ConfigError(
                "embedding model identifier is empty".into(),
            ));
        }
        if pretrained.is_empty() {
            return Err(SearchError::ConfigError(
                "embedding pretrained weights identifier is empty".into(),
            ));
        }

        Ok(Self { model, pretrained })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn pretrained(&self) -> &str {
        &self.pretrained
    }

    /// Whether an `mspec` tag recorded in the index refers to this model.
    pub fn matches_tag(&self, tag: &str) -> bool {
        tag == self.to_string()
    }
}

/// Rendered as `model/pretrained`, the same tag the index stores in `mspec`.
impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.model, self.pretrained)
    }
}

/// Query text together with its unit-length embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedQuery {
    pub text: String,
    pub vector: Vec<f32>,
}

/// The GeoCities page a gif was found on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocitiesPage {
    pub url: String,
    pub timestamp: String,
}

/// One archived placement of a gif.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GifUse {
    pub url: String,
    pub timestamp: String,
    pub path: String,
    pub filename: String,
    #[serde(default)]
    pub page: Option<GeocitiesPage>,
}

/// A gif document as stored in the index.
///
/// `uses` is only present when the request did not exclude it from `_source`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GifSource {
    pub checksum: String,
    /// Number of recorded uses.
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    /// Safety classifier score, 0 (safe) to 1.
    #[serde(default)]
    pub mnsfw: f32,
    /// Embedding model tag recorded at index time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mspec: Option<String>,
    #[serde(default)]
    pub uses: Vec<GifUse>,
}

/// A gif in a result list. Uses are left out; see [`GifSource`] for detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GifHit {
    pub checksum: String,
    pub page_count: u32,
    pub width: i32,
    pub height: i32,
    pub mnsfw: f32,
}

impl From<GifSource> for GifHit {
    fn from(source: GifSource) -> Self {
        Self {
            checksum: source.checksum,
            page_count: source.page_count,
            width: source.width,
            height: source.height,
            mnsfw: source.mnsfw,
        }
    }
}

/// Validated search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub q: String,
    pub offset: u64,
    pub page_size: u64,
    pub flavor: SearchFlavor,
    pub mnsfw: f32,
}

/// One page of search results with pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub q: String,
    pub flavor: SearchFlavor,
    pub offset: u64,
    pub page_size: u64,
    pub mnsfw: f32,
    pub total_hits: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub results: Vec<GifHit>,
}
