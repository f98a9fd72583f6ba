//! Retrieval engine: embeds a request description and pulls the most similar
//! successful proposals and success patterns as structured few-shot context.
//!
//! The read path is fail-silent by contract: a missing context must never
//! block generation, so every failure collapses to an empty context.

pub mod context;
pub mod engine;
pub mod query;

pub use context::{ContextStats, RagContext};
pub use engine::RetrievalEngine;
pub use query::RetrievalQuery;

/// Neighbors retrieved per search when the caller does not override it.
pub const DEFAULT_TOP_K: usize = 3;
