//! Embedding service enforcing the deployment's vector dimension

use std::sync::Arc;

use async_trait::async_trait;

use super::client::EmbeddingClient;
use super::Embedder;
use super::EmbeddingConfig;
use crate::errors::Result;
use crate::errors::RicordaError;

/// Service for generating embeddings at the configured dimension
///
/// Write-time and query-time embeddings must share one dimension; a provider
/// response of any other length is reported as a configuration error rather
/// than passed downstream.
pub struct EmbeddingService {
    client: Arc<EmbeddingClient>,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Build the service from the application config
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        Self::from_config(EmbeddingConfig::from_app_config(config))
    }

    /// Build the service from an explicit embedding config
    pub fn from_config(config: EmbeddingConfig) -> Result<Self> {
        let client = EmbeddingClient::new(
            config.provider,
            config.model.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
        )?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Embed one text at the configured dimension
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        let processed = preprocess(text);

        let embedding = self.client.generate(&processed).await?;

        if embedding.len() != self.config.dimension {
            return Err(RicordaError::Configuration(format!(
                "Embedding dimension mismatch: provider returned {}, configured {}",
                embedding.len(),
                self.config.dimension
            )));
        }

        Ok(embedding)
    }

    /// Get the embedding model name
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Embedder for EmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.generate(text).await
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

/// Collapse whitespace runs so multi-line notes embed as one sentence stream
fn preprocess(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_collapses_whitespace() {
        assert_eq!(preprocess("hello\nworld"), "hello world");
        assert_eq!(preprocess("  spaced   out\ttext  "), "spaced out text");
        assert_eq!(preprocess("already clean"), "already clean");
    }
}
