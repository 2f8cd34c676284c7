//! Search index implementations.

mod elasticsearch;
#[cfg(test)]
mod mock;

pub use elasticsearch::{ElasticsearchIndex, IndexCredentials};
#[cfg(test)]
pub use mock::MockGifIndex;
