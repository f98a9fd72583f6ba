//! Text-completion oracle seam. The core never calls it; the augmented
//! prompt is handed to whichever implementation the caller wires in.

pub mod client;

pub use client::HttpCompletionClient;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion service unavailable: {0}")]
    Unavailable(String),
    #[error("Completion oracle returned empty content")]
    EmptyCompletion,
    #[error("No completion provider configured")]
    NotConfigured,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
