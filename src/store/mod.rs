//! Vector store adapters
//!
//! Notes live in a namespaced vector collection behind the [`VectorStore`]
//! trait:
//! - [`PgVectorStore`] persists to Postgres with the pgvector extension
//! - [`InMemoryStore`] keeps everything in process, for tests and local runs
//!
//! Nearest-neighbor results come back as raw [`Match`] pairs; their order is
//! not part of the contract, ranking happens in [`crate::rag`].

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgVectorStore;

use async_trait::async_trait;

use crate::errors::Result;
use crate::rag::Match;

/// A namespaced vector collection holding notes
///
/// Namespace = conversation identifier; implementations must never return
/// matches across namespaces. Writes fail with
/// [`crate::RicordaError::StoreWrite`], reads with
/// [`crate::RicordaError::StoreQuery`]; no retries happen at this layer.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert or replace a note record, idempotent per `id`
    async fn upsert(&self, namespace: &str, id: &str, vector: Vec<f32>, text: &str) -> Result<()>;

    /// Return up to `top_k` nearest neighbors, in no guaranteed order
    async fn query(&self, namespace: &str, vector: Vec<f32>, top_k: usize) -> Result<Vec<Match>>;

    /// Irreversibly remove every note in the namespace
    async fn delete_all(&self, namespace: &str) -> Result<()>;
}
