//! # licita-rag
//!
//! Retrieval/feedback core of a bid-proposal assistant. Rated proposal
//! fragments are embedded and stored with their outcome metadata; winning,
//! highly rated text is mined for recurring success patterns; and new
//! generation requests retrieve their nearest successful neighbors as
//! few-shot context injected into the generation prompt.
//!
//! ## Architecture
//!
//! ```text
//! rating ─► FeedbackRecorder ─► embed ─► VectorInserter ─► backend
//!                 └─ (win, rating ≥ 4) ─► PatternDetector ─► patterns
//!
//! request ─► RetrievalEngine ─► embed ─► VectorSearcher ─┬─ proposals
//!                                                        └─ patterns
//!                        └─► RagContext ─► augment() ─► completion oracle
//! ```
//!
//! The embedding oracle, the completion oracle and the persistence backend
//! are injected trait objects; any implementation satisfying the contracts
//! substitutes cleanly. The write path fails loud, the read path degrades
//! to an empty context — never the other way around.

pub mod assistant;
pub mod config;
pub mod embedding;
pub mod feedback;
pub mod llm;
pub mod patterns;
pub mod prompt;
pub mod retrieval;
pub mod vector;

pub use assistant::{AssistantError, ProposalAssistant};
pub use config::{ConfigError, RagConfig};
pub use embedding::{EmbeddingError, EmbeddingGateway, EmbeddingProvider, HttpEmbeddingClient};
pub use feedback::{FeedbackError, FeedbackRecorder, ProposalFeedback};
pub use llm::{CompletionError, CompletionProvider, HttpCompletionClient};
pub use patterns::{PatternDetector, PatternMatch};
pub use prompt::augment;
pub use retrieval::{ContextStats, RagContext, RetrievalEngine, RetrievalQuery, DEFAULT_TOP_K};
pub use vector::{
    MemoryBackend, Module, PatternRecord, ProposalMetadata, ProposalRecord, RagStats,
    RecordBackend, SearchFilters, SearchResult, StoreError, VectorInserter, VectorSearcher,
};
