//! Note store: embed -> upsert and embed -> query -> rank orchestration

use std::sync::Arc;

use tracing::debug;
use tracing::info;
use uuid::Uuid;

use super::ranker::rank;
use super::RankedResult;
use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::store::VectorStore;

/// Over-fetch multiplier applied to the requested result count, so the
/// dedup/threshold pass has enough candidates when duplicates exist
const OVERFETCH_FACTOR: usize = 4;

/// Floor on the number of candidates fetched per query
const MIN_FETCH: usize = 10;

/// Long-term note memory for conversations
///
/// Thin orchestration over an [`Embedder`] and a [`VectorStore`]: one
/// embedding call and one store call per operation, no retries, no batching.
/// All state lives in the store; namespaces isolate conversations from each
/// other.
pub struct NoteStore {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    score_min: f32,
    result_count: usize,
}

impl NoteStore {
    /// Create a note store with explicit search policy
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        score_min: f32,
        result_count: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            score_min,
            result_count,
        }
    }

    /// Create from configuration and existing services
    pub fn from_services(
        config: &crate::config::AppConfig,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self::new(embedder, store, config.score_min(), config.result_count())
    }

    /// Persist a note in the conversation's namespace
    ///
    /// Returns the opaque id the note was stored under. Identical text stored
    /// twice yields two notes with different ids; search-time deduplication
    /// is what hides that from the user, not a store constraint.
    ///
    /// # Errors
    /// - Embedding failures (auth, quota, transport)
    /// - Store write failures
    pub async fn remember(&self, namespace: &str, text: &str) -> Result<String> {
        let vector = self.embedder.embed(text).await?;

        let id = Uuid::new_v4().to_string();
        self.store.upsert(namespace, &id, vector, text).await?;

        info!("Stored note {} in namespace {}", id, namespace);
        Ok(id)
    }

    /// Search the conversation's notes with the configured policy
    ///
    /// # Errors
    /// - Embedding failures (auth, quota, transport)
    /// - Store query failures
    pub async fn search(&self, namespace: &str, query: &str) -> Result<Vec<RankedResult>> {
        self.search_with_options(namespace, query, self.result_count, self.score_min)
            .await
    }

    /// Search with explicit result count and similarity threshold
    ///
    /// Over-fetches `max(k * 4, 10)` candidates from the store, then ranks:
    /// dedup, threshold, best-effort fallback.
    ///
    /// # Errors
    /// - Embedding failures (auth, quota, transport)
    /// - Store query failures
    pub async fn search_with_options(
        &self,
        namespace: &str,
        query: &str,
        k: usize,
        score_min: f32,
    ) -> Result<Vec<RankedResult>> {
        let vector = self.embedder.embed(query).await?;

        let top_k = (k * OVERFETCH_FACTOR).max(MIN_FETCH);
        let matches = self.store.query(namespace, vector, top_k).await?;

        debug!(
            "Query in namespace {} returned {} raw matches",
            namespace,
            matches.len()
        );

        Ok(rank(&matches, k, score_min))
    }

    /// Irreversibly delete every note in the conversation's namespace
    ///
    /// # Errors
    /// - Store write failures
    pub async fn forget(&self, namespace: &str) -> Result<()> {
        self.store.delete_all(namespace).await?;

        info!("Cleared all notes in namespace {}", namespace);
        Ok(())
    }

    /// Get the configured similarity threshold
    pub fn score_min(&self) -> f32 {
        self.score_min
    }

    /// Get the configured result count
    pub fn result_count(&self) -> usize {
        self.result_count
    }
}
