//! High-level coordinator wiring the feedback and retrieval halves of the
//! loop over one shared store and embedding gateway.

use crate::config::RagConfig;
use crate::embedding::{EmbeddingError, EmbeddingGateway, EmbeddingProvider, HttpEmbeddingClient};
use crate::feedback::{FeedbackError, FeedbackRecorder, ProposalFeedback};
use crate::llm::{CompletionError, CompletionProvider, HttpCompletionClient};
use crate::prompt::augment;
use crate::retrieval::{RetrievalEngine, RetrievalQuery, DEFAULT_TOP_K};
use crate::vector::{
    Module, RagStats, RecordBackend, StoreError, VectorInserter, VectorSearcher,
};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Embedding client setup failed: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("Completion client setup failed: {0}")]
    Completion(#[from] CompletionError),
}

pub struct ProposalAssistant {
    recorder: FeedbackRecorder,
    engine: RetrievalEngine,
    searcher: VectorSearcher,
    completion: Option<Arc<dyn CompletionProvider>>,
    top_k: usize,
}

impl ProposalAssistant {
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        backend: Arc<dyn RecordBackend>,
        dimension: usize,
    ) -> Self {
        let gateway = Arc::new(EmbeddingGateway::new(provider, dimension));
        let inserter = VectorInserter::new(Arc::clone(&backend), dimension);
        let searcher = VectorSearcher::new(backend, dimension);

        Self {
            recorder: FeedbackRecorder::new(Arc::clone(&gateway), inserter),
            engine: RetrievalEngine::new(gateway, searcher.clone()),
            searcher,
            completion: None,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Wire both HTTP clients from the environment-driven config over the
    /// given backend.
    pub fn from_config(
        config: &RagConfig,
        backend: Arc<dyn RecordBackend>,
    ) -> Result<Self, AssistantError> {
        let embedding = HttpEmbeddingClient::new(config)?;
        let completion = HttpCompletionClient::new(config)?;

        Ok(
            Self::new(Arc::new(embedding), backend, config.embedding_dim)
                .with_completion(Arc::new(completion))
                .with_top_k(config.top_k),
        )
    }

    pub fn with_completion(mut self, completion: Arc<dyn CompletionProvider>) -> Self {
        self.completion = Some(completion);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Register a rating. Fail-loud: the caller must surface an error to
    /// the user, an unrecorded rating is not silently dropped.
    pub async fn record_feedback(&self, feedback: ProposalFeedback) -> Result<Uuid, FeedbackError> {
        self.recorder.record(feedback).await
    }

    /// Retrieve context for the query and fold it into the base prompt.
    /// Fail-silent: with nothing retrievable the base prompt comes back
    /// unchanged.
    pub async fn enrich_prompt(&self, base_prompt: &str, query: &RetrievalQuery) -> String {
        let context = self.engine.build_context(query, self.top_k).await;
        augment(base_prompt, &context)
    }

    /// Enrich and hand off to the configured completion oracle.
    pub async fn generate(
        &self,
        base_prompt: &str,
        query: &RetrievalQuery,
    ) -> Result<String, CompletionError> {
        let completion = self
            .completion
            .as_ref()
            .ok_or(CompletionError::NotConfigured)?;
        let prompt = self.enrich_prompt(base_prompt, query).await;
        completion.complete(&prompt).await
    }

    pub async fn stats(&self, module: Option<Module>) -> Result<RagStats, StoreError> {
        self.searcher.rag_stats(module).await
    }
}
