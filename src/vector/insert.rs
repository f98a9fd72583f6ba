//! Write path of the vector store. The feedback recorder is the only caller;
//! retrieval never writes.

use crate::vector::backend::RecordBackend;
use crate::vector::schema::{Module, PatternRecord, ProposalMetadata, ProposalRecord};
use crate::vector::StoreError;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub struct VectorInserter {
    backend: Arc<dyn RecordBackend>,
    vector_size: usize,
}

impl VectorInserter {
    pub fn new(backend: Arc<dyn RecordBackend>, vector_size: usize) -> Self {
        Self {
            backend,
            vector_size,
        }
    }

    /// Append a proposal record. Named after the source operation; there is
    /// no update-by-id path, every call inserts a fresh record.
    pub async fn upsert_proposal(
        &self,
        content: String,
        embedding: Vec<f32>,
        metadata: ProposalMetadata,
    ) -> Result<Uuid, StoreError> {
        self.check_dimensions(&embedding)?;

        let record = ProposalRecord::new(content, embedding, metadata);
        let id = record.id;
        self.backend.insert_proposal(record).await?;
        debug!(%id, "proposal record stored");
        Ok(id)
    }

    /// Append a pattern record. Repeated detections of the same pattern
    /// across feedback events accumulate; they are reinforcement signal,
    /// not duplicates to collapse.
    pub async fn upsert_pattern(
        &self,
        pattern_type: &str,
        description: &str,
        embedding: Vec<f32>,
        module: Module,
    ) -> Result<Uuid, StoreError> {
        self.check_dimensions(&embedding)?;

        let record = PatternRecord::new(
            pattern_type.to_string(),
            description.to_string(),
            embedding,
            module,
        );
        let id = record.id;
        self.backend.insert_pattern(record).await?;
        debug!(%id, pattern_type, "pattern record stored");
        Ok(id)
    }

    fn check_dimensions(&self, embedding: &[f32]) -> Result<(), StoreError> {
        if embedding.len() != self.vector_size {
            return Err(StoreError::InvalidVectorDimensions {
                expected: self.vector_size,
                actual: embedding.len(),
            });
        }
        Ok(())
    }
}
