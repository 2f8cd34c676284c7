//! Elasticsearch implementation of [`GifIndex`] over its REST API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::domain::search::traits::{GifIndex, IndexHits, Result, SearchError};
use crate::domain::search::types::GifSource;

/// Basic auth credentials for the cluster.
#[derive(Debug, Clone)]
pub struct IndexCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    total: Option<TotalHits>,
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: GifSource,
}

impl From<SearchResponse> for IndexHits {
    fn from(resp: SearchResponse) -> Self {
        let hits: Vec<GifSource> = resp.hits.hits.into_iter().map(|h| h.source).collect();
        let total = resp
            .hits
            .total
            .map(|t| t.value)
            .unwrap_or(hits.len() as u64);
        Self { total, hits }
    }
}

/// Client for a single gif index.
///
/// The reqwest client is built once and reused; requests time out after the
/// configured duration and are never retried.
#[derive(Clone)]
pub struct ElasticsearchIndex {
    client: reqwest::Client,
    search_url: Url,
    credentials: Option<IndexCredentials>,
}

impl ElasticsearchIndex {
    pub fn new(
        base_url: &Url,
        index: &str,
        timeout: Duration,
        credentials: Option<IndexCredentials>,
    ) -> Result<Self> {
        if index.trim().is_empty() {
            return Err(SearchError::ConfigError("index name is empty".into()));
        }

        let search_url = search_url(base_url, index)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::ConfigError(format!("index client: {e}")))?;

        Ok(Self {
            client,
            search_url,
            credentials,
        })
    }
}

fn search_url(base_url: &Url, index: &str) -> Result<Url> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(&format!("{}/_search", index.trim()))
        .map_err(|e| SearchError::ConfigError(format!("invalid index url: {e}")))
}

#[async_trait]
impl GifIndex for ElasticsearchIndex {
    async fn search(&self, body: &Value) -> Result<IndexHits> {
        let mut request = self.client.post(self.search_url.clone()).json(body);
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let reason = resp.text().await.unwrap_or_default();
            return Err(SearchError::IndexError(format!("{status}: {reason}")));
        }

        let parsed = resp
            .json::<SearchResponse>()
            .await
            .map_err(|e| SearchError::IndexError(format!("bad search response: {e}")))?;

        Ok(parsed.into())
    }
}
