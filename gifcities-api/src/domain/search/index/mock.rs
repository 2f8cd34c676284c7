//! Mock index implementation for testing.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, RwLock};

use crate::domain::search::traits::{GifIndex, IndexHits, Result, SearchError};
use crate::domain::search::types::GifSource;

/// In-memory index that understands just enough of the request body to be
/// useful: the checksum `term` query, the `mnsfw` post filter and `from`/`size`.
///
/// Every request body is recorded for assertions.
#[derive(Clone, Default)]
pub struct MockGifIndex {
    documents: Arc<RwLock<Vec<GifSource>>>,
    requests: Arc<RwLock<Vec<Value>>>,
    failing: bool,
}

impl MockGifIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add initial documents, in the order the index should return them.
    pub fn with_documents(self, docs: Vec<GifSource>) -> Self {
        self.documents.write().unwrap().extend(docs);
        self
    }

    /// Make every search fail with an index error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of searches received.
    pub fn call_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    /// Request bodies received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl GifIndex for MockGifIndex {
    async fn search(&self, body: &Value) -> Result<IndexHits> {
        self.requests.write().unwrap().push(body.clone());
        if self.failing {
            return Err(SearchError::IndexError("mock index unavailable".into()));
        }

        let documents = self.documents.read().unwrap();
        let checksum = body["query"]["term"]["checksum"].as_str();
        let threshold = body["post_filter"]["range"]["mnsfw"]["lte"].as_f64();

        let matching: Vec<GifSource> = documents
            .iter()
            .filter(|doc| checksum.map_or(true, |c| doc.checksum == c))
            .filter(|doc| threshold.map_or(true, |t| f64::from(doc.mnsfw) <= t))
            .cloned()
            .collect();

        let from = body["from"].as_u64().unwrap_or(0) as usize;
        let size = body["size"].as_u64().unwrap_or(10) as usize;

        Ok(IndexHits {
            total: matching.len() as u64,
            hits: matching.into_iter().skip(from).take(size).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(checksum: &str, mnsfw: f32) -> GifSource {
        GifSource {
            checksum: checksum.to_string(),
            page_count: 1,
            width: 1,
            height: 1,
            mnsfw,
            mspec: None,
            uses: vec![],
        }
    }

    #[tokio::test]
    async fn applies_post_filter_and_paging() {
        let index = MockGifIndex::new().with_documents(vec![
            doc("a", 0.1),
            doc("b", 0.9),
            doc("c", 0.2),
            doc("d", 0.3),
        ]);

        let hits = index
            .search(&json!({
                "from": 1,
                "size": 1,
                "post_filter": { "range": { "mnsfw": { "lte": 0.5 } } }
            }))
            .await
            .unwrap();

        assert_eq!(hits.total, 3);
        assert_eq!(hits.hits.len(), 1);
        assert_eq!(hits.hits[0].checksum, "c");
        assert_eq!(index.call_count(), 1);
    }

    #[tokio::test]
    async fn term_query_matches_checksum() {
        let index = MockGifIndex::new().with_documents(vec![doc("a", 0.1), doc("b", 0.1)]);

        let hits = index
            .search(&json!({ "size": 1, "query": { "term": { "checksum": "b" } } }))
            .await
            .unwrap();

        assert_eq!(hits.total, 1);
        assert_eq!(hits.hits[0].checksum, "b");
    }
}
