//! HTTP clients for the supported embedding providers

use reqwest::Client;
use reqwest::Response;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::errors::RicordaError;

/// Supported embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// `OpenAI`-compatible embeddings endpoint
    OpenAI,
    /// Ollama local embeddings
    Ollama,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Deserialize)]
struct OpenAiEmbedding {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct OllamaResponse {
    embedding: Vec<f32>,
}

/// Client speaking one provider's embeddings API
pub struct EmbeddingClient {
    provider: EmbeddingProvider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    http: Client,
}

impl EmbeddingClient {
    /// Build a client for the given provider
    ///
    /// # Errors
    /// - HTTP client construction failures
    pub fn new(
        provider: EmbeddingProvider,
        model: String,
        endpoint: String,
        api_key: Option<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| RicordaError::Http(e.to_string()))?;

        Ok(Self {
            provider,
            model,
            endpoint,
            api_key,
            http,
        })
    }

    /// Embed one text through the configured provider
    ///
    /// # Errors
    /// - Transport failures (network errors, timeouts)
    /// - Provider rejections (auth, quota, invalid model) and malformed bodies
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        match self.provider {
            EmbeddingProvider::OpenAI => self.generate_openai(text).await,
            EmbeddingProvider::Ollama => self.generate_ollama(text).await,
        }
    }

    async fn generate_openai(&self, text: &str) -> Result<Vec<f32>> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RicordaError::Configuration("OpenAI API key not set".to_string()))?;

        let url = format!("{}/embeddings", self.endpoint);
        debug!("POST {} (model {})", url, self.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&OpenAiRequest {
                input: text,
                model: &self.model,
            })
            .send()
            .await
            .map_err(|e| RicordaError::Http(e.to_string()))?;

        let body: OpenAiResponse = decode(response).await?;
        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| RicordaError::Embedding("provider returned no embedding".to_string()))
    }

    async fn generate_ollama(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("POST {} (model {})", url, self.model);

        let response = self
            .http
            .post(&url)
            .json(&OllamaRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(|e| RicordaError::Http(e.to_string()))?;

        let body: OllamaResponse = decode(response).await?;
        Ok(body.embedding)
    }
}

/// Turn non-2xx statuses into embedding errors carrying the response body
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RicordaError::Embedding(format!(
            "embedding endpoint returned {status}: {body}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| RicordaError::Embedding(format!("malformed embedding response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires API key"]
    async fn test_openai_embedding() {
        let client = EmbeddingClient::new(
            EmbeddingProvider::OpenAI,
            "text-embedding-3-small".to_string(),
            "https://api.openai.com/v1".to_string(),
            std::env::var("OPENAI_API_KEY").ok(),
        )
        .unwrap();

        let embedding = client.generate("Hello, world!").await.unwrap();
        assert_eq!(embedding.len(), 1536);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_a_configuration_error() {
        let client = EmbeddingClient::new(
            EmbeddingProvider::OpenAI,
            "text-embedding-3-small".to_string(),
            "https://api.openai.com/v1".to_string(),
            None,
        )
        .unwrap();

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, RicordaError::Configuration(_)));
    }
}
