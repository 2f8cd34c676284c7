//! Mock embedder implementation for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::search::traits::{Embedder, Result, SearchError};
use crate::domain::search::types::ModelSpec;

/// Mock embedder that returns configurable vectors and counts calls.
///
/// # Examples
///
/// ```ignore
/// // Return a fixed vector
/// let embedder = MockEmbedder::returning(vec![0.1; 512]);
///
/// // Return different vectors for each call
/// let embedder = MockEmbedder::with_sequence(vec![
///     vec![0.1; 512],
///     vec![0.2; 512],
/// ]);
/// ```
#[derive(Clone)]
pub struct MockEmbedder {
    responses: Arc<Vec<Vec<f32>>>,
    call_count: Arc<AtomicUsize>,
    spec: ModelSpec,
    failing: bool,
    delay: Option<Duration>,
}

impl MockEmbedder {
    pub const MODEL: &'static str = "ViT-B-32";
    pub const PRETRAINED: &'static str = "laion2b_s34b_b79k";

    /// Create a mock that always returns the same vector.
    pub fn returning(vector: Vec<f32>) -> Self {
        Self::with_sequence(vec![vector])
    }

    /// Create a mock that returns vectors in sequence.
    ///
    /// Wraps around if more calls are made than vectors provided.
    pub fn with_sequence(vectors: Vec<Vec<f32>>) -> Self {
        Self {
            responses: Arc::new(vectors),
            call_count: Arc::new(AtomicUsize::new(0)),
            spec: ModelSpec::new(Self::MODEL, Self::PRETRAINED)
                .expect("mock model spec is valid"),
            failing: false,
            delay: None,
        }
    }

    /// Create a mock whose every call fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Make every call wait before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times `embed` was called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call counter.
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::returning(vec![1.0; 512])
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(SearchError::EmbeddingError("mock embedder failure".into()));
        }
        let response_idx = idx % self.responses.len();
        Ok(self.responses[response_idx].clone())
    }

    fn model_spec(&self) -> &ModelSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_sequence() {
        let embedder = MockEmbedder::with_sequence(vec![vec![1.0], vec![2.0], vec![3.0]]);

        assert_eq!(embedder.embed("a").await.unwrap(), vec![1.0]);
        assert_eq!(embedder.embed("b").await.unwrap(), vec![2.0]);
        assert_eq!(embedder.embed("c").await.unwrap(), vec![3.0]);
        // Wraps around
        assert_eq!(embedder.embed("d").await.unwrap(), vec![1.0]);
    }

    #[tokio::test]
    async fn mock_tracks_call_count() {
        let embedder = MockEmbedder::default();

        assert_eq!(embedder.call_count(), 0);
        embedder.embed("a").await.unwrap();
        assert_eq!(embedder.call_count(), 1);

        embedder.reset();
        assert_eq!(embedder.call_count(), 0);
    }

    #[tokio::test]
    async fn failing_mock_still_counts() {
        let embedder = MockEmbedder::failing();

        assert!(embedder.embed("a").await.is_err());
        assert_eq!(embedder.call_count(), 1);
    }
}
