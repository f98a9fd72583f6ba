//! The structured few-shot context handed to prompt augmentation.

use crate::vector::{PatternRecord, ProposalRecord, SearchResult};
use serde::Serialize;

/// How many neighbors of each kind actually made it into the context.
/// Computed after ranking and truncation, so both are at most top-k.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContextStats {
    pub proposals_used: usize,
    pub patterns_used: usize,
}

/// Retrieved context for one generation request. An empty context is the
/// normal degraded state — indistinguishable from "no prior data yet".
#[derive(Debug, Clone, Default, Serialize)]
pub struct RagContext {
    pub successful_proposals: Vec<SearchResult<ProposalRecord>>,
    pub detected_patterns: Vec<SearchResult<PatternRecord>>,
    pub stats: ContextStats,
}

impl RagContext {
    pub fn is_empty(&self) -> bool {
        self.successful_proposals.is_empty() && self.detected_patterns.is_empty()
    }
}
