//! HTTP completion client for OpenAI-compatible `/chat/completions`
//! endpoints.

use crate::config::RagConfig;
use crate::llm::{CompletionError, CompletionProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;
use url::Url;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 1000;

#[derive(Serialize, Debug)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Serialize, Debug)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: String,
}

pub struct HttpCompletionClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl HttpCompletionClient {
    pub fn new(config: &RagConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                CompletionError::Unavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        let endpoint = config.api_url.join("chat/completions").map_err(|e| {
            CompletionError::Unavailable(format!("Invalid completions endpoint: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.generation_model.clone(),
        })
    }

    async fn request_completion(&self, prompt: &str) -> Result<String, CompletionError> {
        let request_body = CompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: Some(1500),
            temperature: Some(0.3),
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
                    CompletionError::Unavailable(
                        "Request timeout - the API took too long to respond".to_string(),
                    )
                } else if e.is_connect() {
                    CompletionError::Unavailable(
                        "Connection error - unable to reach the API".to_string(),
                    )
                } else {
                    CompletionError::Unavailable(format!("Network error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::Unavailable(match status.as_u16() {
                401 => "Authentication failed - check your API key".to_string(),
                403 => "Access forbidden - insufficient permissions".to_string(),
                429 => "Rate limit exceeded - too many requests".to_string(),
                500..=599 => format!("Server error ({}): {}", status, error_text),
                _ => format!("HTTP error {}: {}", status, error_text),
            }));
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            CompletionError::Unavailable(format!("Failed to parse API response as JSON: {}", e))
        })?;

        match parsed.choices.into_iter().next() {
            Some(choice) if !choice.message.content.trim().is_empty() => {
                Ok(choice.message.content)
            }
            _ => Err(CompletionError::EmptyCompletion),
        }
    }
}

#[async_trait]
impl CompletionProvider for HttpCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.request_completion(prompt).await {
                Ok(content) => return Ok(content),
                Err(e) if attempt < MAX_RETRIES => {
                    warn!(
                        "completion attempt {}/{} failed: {}",
                        attempt, MAX_RETRIES, e
                    );
                    tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64))
                        .await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
