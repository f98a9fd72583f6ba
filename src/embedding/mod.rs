//! Embedding gateway: wraps the external embedding oracle behind a trait so
//! any model producing fixed-length vectors can substitute.

pub mod client;

pub use client::HttpEmbeddingClient;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Embedding service unavailable: {0}")]
    Unavailable(String),
    #[error("Embedding oracle returned an empty vector")]
    EmptyEmbedding,
    #[error("Invalid embedding dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// The oracle contract: text in, fixed-dimension vector out.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Validating front for an [`EmbeddingProvider`]: rejects empty input,
/// degenerate output and dimension drift before anything reaches the store.
pub struct EmbeddingGateway {
    provider: Arc<dyn EmbeddingProvider>,
    dimension: usize,
}

impl EmbeddingGateway {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, dimension: usize) -> Self {
        Self {
            provider,
            dimension,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "empty text provided".to_string(),
            ));
        }

        let vector = self.provider.embed(text).await?;
        if vector.is_empty() {
            return Err(EmbeddingError::EmptyEmbedding);
        }
        if vector.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(vector)
    }

    /// Embed several texts sequentially, preserving input order. The oracle
    /// has no batch endpoint; the first failure aborts the whole batch, no
    /// partial results are returned.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}
