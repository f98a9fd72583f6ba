//! HTTP embedding client for OpenAI-compatible `/embeddings` endpoints.

use crate::config::RagConfig;
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;
use url::Url;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

#[derive(Serialize, Debug)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize, Debug)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize, Debug)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

pub struct HttpEmbeddingClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl HttpEmbeddingClient {
    pub fn new(config: &RagConfig) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                EmbeddingError::Unavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        let endpoint = config.api_url.join("embeddings").map_err(|e| {
            EmbeddingError::Unavailable(format!("Invalid embeddings endpoint: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.embedding_model.clone(),
        })
    }

    async fn request_embedding(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Unavailable(
                        "Request timeout - the API took too long to respond".to_string(),
                    )
                } else if e.is_connect() {
                    EmbeddingError::Unavailable(
                        "Connection error - unable to reach the API".to_string(),
                    )
                } else {
                    EmbeddingError::Unavailable(format!("Network error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EmbeddingError::Unavailable(match status.as_u16() {
                401 => "Authentication failed - check your API key".to_string(),
                403 => "Access forbidden - insufficient permissions".to_string(),
                429 => "Rate limit exceeded - too many requests".to_string(),
                500..=599 => format!("Server error ({}): {}", status, error_text),
                _ => format!("HTTP error {}: {}", status, error_text),
            }));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            EmbeddingError::Unavailable(format!("Failed to parse API response as JSON: {}", e))
        })?;

        match parsed.data.into_iter().next() {
            Some(data) if !data.embedding.is_empty() => Ok(data.embedding),
            _ => Err(EmbeddingError::EmptyEmbedding),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.request_embedding(text).await {
                Ok(vector) => return Ok(vector),
                Err(e) if attempt < MAX_RETRIES => {
                    warn!("embedding attempt {}/{} failed: {}", attempt, MAX_RETRIES, e);
                    tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64))
                        .await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
