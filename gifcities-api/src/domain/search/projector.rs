//! Shapes raw index hits into result pages.

use super::traits::IndexHits;
use super::types::{GifHit, GifSource, ModelSpec, SearchPage, SearchParams};

/// 1-based page that `offset` falls on.
pub fn current_page(offset: u64, page_size: u64) -> u64 {
    offset / page_size.max(1) + 1
}

/// Number of pages needed for `total_hits`. An empty result is still one page.
pub fn total_pages(total_hits: u64, page_size: u64) -> u64 {
    total_hits.div_ceil(page_size.max(1)).max(1)
}

/// Turn index hits into a result page.
///
/// Results are re-sorted by height, tallest first. The index already ordered
/// them by its own sort, so this only reorders within the page.
pub fn project_page(params: &SearchParams, hits: IndexHits) -> SearchPage {
    let mut results: Vec<GifHit> = hits.hits.into_iter().map(GifHit::from).collect();
    results.sort_by(|a, b| b.height.cmp(&a.height));

    SearchPage {
        q: params.q.clone(),
        flavor: params.flavor,
        offset: params.offset,
        page_size: params.page_size,
        mnsfw: params.mnsfw,
        total_hits: hits.total,
        current_page: current_page(params.offset, params.page_size),
        total_pages: total_pages(hits.total, params.page_size),
        results,
    }
}

/// Distinct `mspec` tags among `hits` that were not produced by `spec`.
///
/// Hits without a tag, or with an empty one, are ignored.
pub fn mismatched_model_tags(hits: &[GifSource], spec: &ModelSpec) -> Vec<String> {
    let mut tags: Vec<String> = hits
        .iter()
        .filter_map(|hit| hit.mspec.as_deref())
        .filter(|tag| !tag.trim().is_empty())
        .filter(|tag| !spec.matches_tag(tag))
        .map(str::to_string)
        .collect();
    tags.sort();
    tags.dedup();
    tags
}
