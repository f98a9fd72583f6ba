//! Vector store: labeled proposal fragments and success patterns with their
//! embeddings and outcome metadata. Writes are append-only inserts; reads
//! are filtered cosine-similarity scans.

pub mod backend;
pub mod insert;
pub mod query;
pub mod schema;
pub mod similarity;

pub use backend::{MemoryBackend, RecordBackend};
pub use insert::VectorInserter;
pub use query::VectorSearcher;
pub use schema::*;

#[cfg(test)]
mod tests;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unreachable: {0}")]
    Unavailable(String),
    #[error("Insert operation failed: {0}")]
    InsertFailed(String),
    #[error("Query operation failed: {0}")]
    QueryFailed(String),
    #[error("Invalid vector dimensions: expected {expected}, got {actual}")]
    InvalidVectorDimensions { expected: usize, actual: usize },
}
