//! Turning note text into fixed-length vectors
//!
//! Two providers are supported, picked from the configured endpoint: OpenAI
//! (text-embedding-3-small and friends) and Ollama for local models. The
//! [`Embedder`] trait is the seam the rest of the crate depends on, so
//! retrieval logic can be exercised with fakes and no network access.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ricorda::config::AppConfig;
//! use ricorda::embeddings::EmbeddingService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = EmbeddingService::new(&AppConfig::load()?)?;
//!     let vector = service.generate("ship on friday").await?;
//!     assert_eq!(vector.len(), 1536);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod service;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use service::EmbeddingService;

use async_trait::async_trait;

use crate::errors::Result;

/// Default embedding dimension for OpenAI text-embedding-3-small
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// An external service turning text into a fixed-length vector
///
/// Implementations must produce the same dimension for every call within a
/// deployment. Failures surface as [`crate::RicordaError::Embedding`]; no
/// retries happen at this layer.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text into a vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// The vector dimension this embedder produces
    fn dimension(&self) -> usize;
}

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl EmbeddingConfig {
    /// Derive the embedding setup from the application config
    ///
    /// Endpoints mentioning "openai" speak the OpenAI API; everything else is
    /// assumed to speak the Ollama embeddings API and needs no key.
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        let endpoint = config.embedding_endpoint();
        let provider = if endpoint.contains("openai") {
            EmbeddingProvider::OpenAI
        } else {
            EmbeddingProvider::Ollama
        };

        Self {
            provider,
            model: config.embedding_model().to_string(),
            dimension: config.embedding_dimension(),
            endpoint: endpoint.to_string(),
            api_key: match provider {
                EmbeddingProvider::OpenAI => Some(config.embedding_api_key().to_string()),
                EmbeddingProvider::Ollama => None,
            },
        }
    }
}
