//! Chat completion client for OpenAI-compatible endpoints

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::ChatMessage;
use crate::errors::Result;
use crate::errors::RicordaError;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: usize,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for chat completion requests
pub struct LlmClient {
    endpoint: String,
    api_key: String,
    model: String,
    http: Client,
}

impl LlmClient {
    /// Create a new LLM client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| RicordaError::Http(e.to_string()))?;

        Ok(Self {
            endpoint: config.llm_endpoint().to_string(),
            api_key: config.llm_key().to_string(),
            model: config.llm_model().to_string(),
            http,
        })
    }

    /// Generate a completion for the given messages
    ///
    /// # Errors
    /// - API request failures (network errors, timeouts, authentication failures)
    /// - Invalid API responses (malformed JSON, empty choices)
    pub async fn generate_with_params(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.endpoint);
        debug!("POST {} (model {})", url, self.model);

        let mut builder = self.http.post(&url);
        // Local endpoints (Ollama and friends) take no auth header
        if !self.api_key.trim().is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder
            .json(&ChatRequest {
                model: &self.model,
                messages,
                temperature,
                max_tokens,
            })
            .send()
            .await
            .map_err(|e| RicordaError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RicordaError::Llm(format!(
                "chat endpoint returned {status}: {body}"
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| RicordaError::Llm(format!("malformed chat response: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| RicordaError::Llm("chat endpoint returned no completion".to_string()))
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.model
    }
}
