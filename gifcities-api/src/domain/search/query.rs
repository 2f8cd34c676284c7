//! Elasticsearch request bodies for each search flavor.

use serde_json::{json, Map, Value};

use super::service::SearchConfig;
use super::traits::{Result, SearchError};
use super::types::{EmbeddedQuery, SearchFlavor, SearchParams};

/// Dense vector field holding image embeddings.
pub const VECTOR_FIELD: &str = "vecs.vector";

/// Fields left out of `_source` in result lists.
const EXCLUDED_SOURCE: [&str; 2] = ["uses", "vecs"];

/// Build the `_search` body for a result page.
///
/// `embedding` is required for semantic and hybrid searches and ignored for
/// lexical ones.
pub fn search_body(
    params: &SearchParams,
    embedding: Option<&EmbeddedQuery>,
    config: &SearchConfig,
) -> Result<Value> {
    let mut body = json!({
        "from": params.offset,
        "size": params.page_size,
        "track_total_hits": true,
        "_source": { "excludes": EXCLUDED_SOURCE },
        "post_filter": safety_filter(params.mnsfw),
    });

    match params.flavor {
        SearchFlavor::Lexical => {
            body["query"] = lexical_query(&params.q);
            body["sort"] = sort_by("page_count", "desc");
        }
        SearchFlavor::Semantic => {
            body["knn"] = knn_query(require_embedding(embedding)?, config);
            body["sort"] = sort_by("_score", "desc");
        }
        SearchFlavor::Hybrid => {
            body["query"] = lexical_query(&params.q);
            body["knn"] = knn_query(require_embedding(embedding)?, config);
            body["sort"] = sort_by("_score", "desc");
        }
    }

    Ok(body)
}

/// Build the `_search` body that fetches one gif, uses included.
pub fn detail_body(checksum: &str) -> Value {
    json!({
        "size": 1,
        "_source": { "excludes": ["vecs"] },
        "query": {
            "term": { "checksum": checksum }
        }
    })
}

fn require_embedding(embedding: Option<&EmbeddedQuery>) -> Result<&EmbeddedQuery> {
    embedding.ok_or_else(|| SearchError::EmbeddingError("query embedding missing".into()))
}

/// Filename matches weigh three times as much as path matches.
fn lexical_query(q: &str) -> Value {
    json!({
        "nested": {
            "path": "uses",
            "query": {
                "multi_match": {
                    "query": q,
                    "fields": ["uses.filename^3", "uses.path"]
                }
            }
        }
    })
}

/// The candidate pool is fixed so post-filtering does not starve small pages.
fn knn_query(embedding: &EmbeddedQuery, config: &SearchConfig) -> Value {
    json!({
        "field": VECTOR_FIELD,
        "query_vector": embedding.vector,
        "k": config.knn_k,
        "num_candidates": config.knn_num_candidates.max(config.knn_k),
    })
}

fn safety_filter(threshold: f32) -> Value {
    json!({
        "range": {
            "mnsfw": { "lte": threshold }
        }
    })
}

/// Primary sort with `checksum` as a stable tie-break across pages.
fn sort_by(field: &str, order: &str) -> Value {
    let mut primary = Map::new();
    primary.insert(field.to_string(), json!({ "order": order }));

    json!([primary, { "checksum": { "order": "asc" } }])
}
