//! Read path of the vector store: filtered fetch, client-side cosine
//! ranking, aggregate stats. Linear scan over the filtered rows; fine at
//! the record counts this system sees.

use crate::vector::backend::RecordBackend;
use crate::vector::schema::{
    Module, PatternRecord, ProposalRecord, RagStats, SearchFilters, SearchResult,
};
use crate::vector::similarity::cosine;
use crate::vector::StoreError;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct VectorSearcher {
    backend: Arc<dyn RecordBackend>,
    vector_size: usize,
}

impl VectorSearcher {
    pub fn new(backend: Arc<dyn RecordBackend>, vector_size: usize) -> Self {
        Self {
            backend,
            vector_size,
        }
    }

    /// Top-k proposals by cosine similarity, descending. Exact score ties
    /// keep insertion order (the sort is stable).
    #[instrument(skip(self, query_embedding))]
    pub async fn search_similar_proposals(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        filters: SearchFilters,
    ) -> Result<Vec<SearchResult<ProposalRecord>>, StoreError> {
        self.check_dimensions(query_embedding)?;

        let rows = self.backend.fetch_proposals(&filters).await?;
        Ok(rank(query_embedding, rows, top_k, |record| {
            record.embedding.as_slice()
        }))
    }

    /// Top-k patterns by cosine similarity, optionally restricted to one
    /// module.
    #[instrument(skip(self, query_embedding))]
    pub async fn search_similar_patterns(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        module: Option<Module>,
    ) -> Result<Vec<SearchResult<PatternRecord>>, StoreError> {
        self.check_dimensions(query_embedding)?;

        let rows = self.backend.fetch_patterns(module).await?;
        Ok(rank(query_embedding, rows, top_k, |record| {
            record.embedding.as_slice()
        }))
    }

    /// Aggregate counts over the store. `success_rate` is a percentage,
    /// 0.0 when no proposals exist.
    pub async fn rag_stats(&self, module: Option<Module>) -> Result<RagStats, StoreError> {
        let filters = match module {
            Some(m) => SearchFilters::new().module(m),
            None => SearchFilters::new(),
        };
        let proposals = self.backend.fetch_proposals(&filters).await?;
        let patterns = self.backend.fetch_patterns(module).await?;

        let total_proposals = proposals.len();
        let successful_proposals = proposals.iter().filter(|p| p.successful).count();
        let success_rate = if total_proposals == 0 {
            0.0
        } else {
            successful_proposals as f64 / total_proposals as f64 * 100.0
        };

        Ok(RagStats {
            total_proposals,
            successful_proposals,
            success_rate,
            total_patterns: patterns.len(),
        })
    }

    fn check_dimensions(&self, query_embedding: &[f32]) -> Result<(), StoreError> {
        if query_embedding.len() != self.vector_size {
            return Err(StoreError::InvalidVectorDimensions {
                expected: self.vector_size,
                actual: query_embedding.len(),
            });
        }
        Ok(())
    }
}

fn rank<T>(
    query: &[f32],
    rows: Vec<T>,
    top_k: usize,
    embedding_of: impl Fn(&T) -> &[f32],
) -> Vec<SearchResult<T>> {
    let mut hits: Vec<SearchResult<T>> = rows
        .into_iter()
        .map(|record| SearchResult {
            score: cosine(query, embedding_of(&record)),
            record,
        })
        .collect();

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits.truncate(top_k);
    hits
}
