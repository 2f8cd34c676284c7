//! Embedding generation implementations.

mod adapter;
mod clip;
#[cfg(test)]
mod mock;

pub use adapter::QueryEmbedder;
pub use clip::ClipEmbedder;
#[cfg(test)]
pub use mock::MockEmbedder;
