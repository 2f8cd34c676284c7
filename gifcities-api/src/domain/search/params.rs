//! Coercion of untyped request parameters into [`SearchParams`].
//!
//! Numeric parameters never fail: anything that does not parse falls back to
//! the configured default. Only the flavor is strict.

use std::str::FromStr;

use serde::Deserialize;

use super::service::SearchConfig;
use super::traits::{Result, SearchError};
use super::types::{SearchFlavor, SearchParams};

/// Query used when `q` is missing or blank.
pub const DEFAULT_QUERY: &str = "geocities";

/// Search parameters exactly as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchParams {
    pub q: Option<String>,
    pub offset: Option<String>,
    pub page_size: Option<String>,
    pub flavor: Option<String>,
    pub mnsfw: Option<String>,
}

impl RawSearchParams {
    /// Collect parameters from decoded query pairs.
    ///
    /// A repeated key keeps its last value and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "q" => &mut params.q,
                "offset" => &mut params.offset,
                "page_size" => &mut params.page_size,
                "flavor" => &mut params.flavor,
                "mnsfw" => &mut params.mnsfw,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        params
    }

    pub fn coerce(&self, config: &SearchConfig) -> Result<SearchParams> {
        let flavor = match self.flavor.as_deref().map(str::trim) {
            None | Some("") => SearchFlavor::default(),
            Some(raw) => SearchFlavor::from_str(raw)
                .map_err(|_| SearchError::InvalidFlavor(raw.to_string()))?,
        };

        let q = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_QUERY)
            .to_string();

        let offset = parse_int(self.offset.as_deref())
            .map(|o| o.max(0) as u64)
            .unwrap_or(0);

        let page_size = parse_int(self.page_size.as_deref())
            .filter(|ps| *ps > 0)
            .map(|ps| ps as u64)
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size)
            .max(1);

        let mnsfw = self
            .mnsfw
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f32>().ok())
            .filter(|t| t.is_finite())
            .map(|t| t.clamp(0.0, 1.0))
            .unwrap_or(config.default_mnsfw);

        Ok(SearchParams {
            q,
            offset,
            page_size,
            flavor,
            mnsfw,
        })
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}
