//! Persistence seam: any store that can append a record and return rows
//! matching equality filters can back the vector store. Similarity is
//! always scored client-side over the filtered rows.

use crate::vector::schema::{Module, PatternRecord, ProposalRecord, SearchFilters};
use crate::vector::StoreError;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[async_trait]
pub trait RecordBackend: Send + Sync {
    async fn insert_proposal(&self, record: ProposalRecord) -> Result<(), StoreError>;

    async fn insert_pattern(&self, record: PatternRecord) -> Result<(), StoreError>;

    /// All proposal rows passing the equality filters, in insertion order.
    async fn fetch_proposals(
        &self,
        filters: &SearchFilters,
    ) -> Result<Vec<ProposalRecord>, StoreError>;

    /// All pattern rows, optionally restricted to one module, in insertion
    /// order.
    async fn fetch_patterns(
        &self,
        module: Option<Module>,
    ) -> Result<Vec<PatternRecord>, StoreError>;
}

/// In-process backend. Append-only vectors of records behind RwLocks;
/// insertion order is the tie-break order for equal similarity scores.
#[derive(Default)]
pub struct MemoryBackend {
    proposals: RwLock<Vec<ProposalRecord>>,
    patterns: RwLock<Vec<PatternRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl RecordBackend for MemoryBackend {
    async fn insert_proposal(&self, record: ProposalRecord) -> Result<(), StoreError> {
        self.proposals.write().await.push(record);
        Ok(())
    }

    async fn insert_pattern(&self, record: PatternRecord) -> Result<(), StoreError> {
        self.patterns.write().await.push(record);
        Ok(())
    }

    async fn fetch_proposals(
        &self,
        filters: &SearchFilters,
    ) -> Result<Vec<ProposalRecord>, StoreError> {
        let proposals = self.proposals.read().await;
        Ok(proposals
            .iter()
            .filter(|record| filters.matches(record))
            .cloned()
            .collect())
    }

    async fn fetch_patterns(
        &self,
        module: Option<Module>,
    ) -> Result<Vec<PatternRecord>, StoreError> {
        let patterns = self.patterns.read().await;
        Ok(patterns
            .iter()
            .filter(|record| module.map_or(true, |m| record.module == m))
            .cloned()
            .collect())
    }
}
