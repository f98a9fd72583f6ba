//! Feedback ingestion: embed the rated fragment, store it, and mine success
//! patterns out of winning, highly rated text.
//!
//! The write path is fail-loud: the caller must know when a rating was not
//! recorded. Pattern mining is the one exception — it is best-effort and
//! never aborts a registration that already stored its proposal.

use crate::embedding::{EmbeddingError, EmbeddingGateway};
use crate::patterns::PatternDetector;
use crate::vector::{Module, ProposalMetadata, StoreError, VectorInserter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Content is truncated to this many characters when building the summary
/// text that gets embedded.
pub const MAX_SUMMARY_CONTENT_CHARS: usize = 2000;

/// Minimum rating (on a successful proposal) for pattern mining to run.
pub const PATTERN_RATING_THRESHOLD: u8 = 4;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Invalid rating {0}: must be between 1 and 5")]
    InvalidRating(u8),
    #[error("Embedding generation failed: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("Vector store write failed: {0}")]
    Store(#[from] StoreError),
}

/// A user's verdict on one generated proposal fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalFeedback {
    pub content: String,
    pub module: Module,
    /// Which annex or section the text belongs to, e.g. "anexo_experiencia".
    pub kind: String,
    pub successful: bool,
    pub rating: u8,
    pub licitation_type: Option<String>,
    pub entity: Option<String>,
    pub reference_amount: Option<f64>,
    pub project_id: Option<String>,
    pub notes: Option<String>,
}

pub struct FeedbackRecorder {
    gateway: Arc<EmbeddingGateway>,
    inserter: VectorInserter,
    detector: PatternDetector,
}

impl FeedbackRecorder {
    pub fn new(gateway: Arc<EmbeddingGateway>, inserter: VectorInserter) -> Self {
        Self {
            gateway,
            inserter,
            detector: PatternDetector::new(),
        }
    }

    /// Register one feedback event. Returns the id of the stored proposal
    /// record. Embedding or store failures propagate; pattern mining
    /// failures do not.
    #[instrument(skip(self, feedback), fields(module = %feedback.module, rating = feedback.rating))]
    pub async fn record(&self, feedback: ProposalFeedback) -> Result<Uuid, FeedbackError> {
        if !(1..=5).contains(&feedback.rating) {
            return Err(FeedbackError::InvalidRating(feedback.rating));
        }

        let summary = summary_text(&feedback);
        let embedding = self.gateway.embed(&summary).await?;

        let metadata = ProposalMetadata {
            module: feedback.module,
            kind: feedback.kind.clone(),
            successful: feedback.successful,
            rating: feedback.rating,
            licitation_type: feedback.licitation_type.clone(),
            entity: feedback.entity.clone(),
            reference_amount: feedback.reference_amount,
            project_id: feedback.project_id.clone(),
            notes: feedback.notes.clone(),
        };
        let id = self
            .inserter
            .upsert_proposal(feedback.content.clone(), embedding, metadata)
            .await?;

        if feedback.successful && feedback.rating >= PATTERN_RATING_THRESHOLD {
            self.mine_patterns(&feedback).await;
        }

        Ok(id)
    }

    /// Best-effort: every failure here is logged and swallowed so it can
    /// never undo a feedback registration that already stored its proposal.
    async fn mine_patterns(&self, feedback: &ProposalFeedback) {
        let matches = self.detector.detect(&feedback.content);
        debug!(count = matches.len(), "success patterns detected");

        for matched in matches {
            let text = format!("{}: {}", matched.pattern_type, matched.description);
            let embedding = match self.gateway.embed(&text).await {
                Ok(vector) => vector,
                Err(e) => {
                    warn!(
                        pattern = matched.pattern_type,
                        "skipping pattern, embedding failed: {}", e
                    );
                    continue;
                }
            };

            if let Err(e) = self
                .inserter
                .upsert_pattern(
                    matched.pattern_type,
                    matched.description,
                    embedding,
                    feedback.module,
                )
                .await
            {
                warn!(
                    pattern = matched.pattern_type,
                    "skipping pattern, store write failed: {}", e
                );
            }
        }
    }
}

/// Representative summary of a feedback event: labeled lines for the
/// section, the (truncated) content, and whatever context is present.
fn summary_text(feedback: &ProposalFeedback) -> String {
    let content: String = feedback
        .content
        .chars()
        .take(MAX_SUMMARY_CONTENT_CHARS)
        .collect();

    let mut lines = vec![
        format!("Sección: {}", feedback.kind),
        format!("Contenido: {}", content),
    ];
    if let Some(licitation_type) = &feedback.licitation_type {
        lines.push(format!("Tipo de licitación: {}", licitation_type));
    }
    if let Some(entity) = &feedback.entity {
        lines.push(format!("Entidad: {}", entity));
    }
    lines.join("\n")
}
