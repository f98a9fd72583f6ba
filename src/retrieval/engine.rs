//! Builds the retrieved context: embed once, fan out both searches
//! concurrently, collapse any failure to an empty context.

use crate::embedding::EmbeddingGateway;
use crate::retrieval::context::{ContextStats, RagContext};
use crate::retrieval::query::RetrievalQuery;
use crate::vector::{SearchFilters, VectorSearcher};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub struct RetrievalEngine {
    gateway: Arc<EmbeddingGateway>,
    searcher: VectorSearcher,
}

impl RetrievalEngine {
    pub fn new(gateway: Arc<EmbeddingGateway>, searcher: VectorSearcher) -> Self {
        Self { gateway, searcher }
    }

    /// Retrieve up to `top_k` similar successful proposals and `top_k`
    /// similar patterns for the query. Never fails: any embedding or store
    /// error degrades to an empty context.
    #[instrument(skip(self, query))]
    pub async fn build_context(&self, query: &RetrievalQuery, top_k: usize) -> RagContext {
        let text = query.query_text();

        let embedding = match self.gateway.embed(&text).await {
            Ok(vector) => vector,
            Err(e) => {
                warn!("retrieval degraded, embedding failed: {}", e);
                return RagContext::default();
            }
        };

        let mut filters = SearchFilters::new().only_successful();
        if let Some(module) = query.module {
            filters = filters.module(module);
        }

        let (proposals, patterns) = futures::join!(
            self.searcher
                .search_similar_proposals(&embedding, top_k, filters),
            self.searcher
                .search_similar_patterns(&embedding, top_k, query.module),
        );

        match (proposals, patterns) {
            (Ok(successful_proposals), Ok(detected_patterns)) => {
                debug!(
                    proposals = successful_proposals.len(),
                    patterns = detected_patterns.len(),
                    "context retrieved"
                );
                RagContext {
                    stats: ContextStats {
                        proposals_used: successful_proposals.len(),
                        patterns_used: detected_patterns.len(),
                    },
                    successful_proposals,
                    detected_patterns,
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("retrieval degraded, search failed: {}", e);
                RagContext::default()
            }
        }
    }
}
