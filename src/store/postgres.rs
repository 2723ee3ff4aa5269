//! Postgres vector store backed by the pgvector extension

use async_trait::async_trait;
use pgvector::Vector;
use sqlx::PgPool;
use tracing::info;

use super::VectorStore;
use crate::errors::Result;
use crate::errors::RicordaError;
use crate::rag::Match;

/// Notes table over Postgres + pgvector
///
/// Scores are cosine similarity computed as `1 - (embedding <=> query)`, so
/// they match the `[0, 1]`-ish range the ranker expects for normalized
/// embeddings.
pub struct PgVectorStore {
    pool: PgPool,
    dimension: usize,
}

impl PgVectorStore {
    pub const fn new(pool: PgPool, dimension: usize) -> Self {
        Self { pool, dimension }
    }

    /// Create a new store instance from configuration
    ///
    /// # Errors
    /// - Connection pool build or connect failures
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout()));

        let pool = pool_options
            .connect(config.store_url())
            .await
            .map_err(|e| RicordaError::StoreWrite(e.to_string()))?;

        info!(
            "Store pool configured: max_connections={}, min_connections={}",
            config.max_connections(),
            config.min_connections()
        );

        Ok(Self::new(pool, config.embedding_dimension()))
    }

    /// Create the notes table and indexes if they don't exist
    ///
    /// The ivfflat index is optional; brute-force scans are exact and fine
    /// for small deployments.
    ///
    /// # Errors
    /// - DDL execution failures (missing pgvector extension, permissions)
    pub async fn init_schema(&self, config: &crate::config::AppConfig) -> Result<()> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await
            .map_err(|e| RicordaError::StoreWrite(e.to_string()))?;

        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS notes (
                id TEXT PRIMARY KEY,
                namespace TEXT NOT NULL,
                content TEXT NOT NULL,
                embedding vector({}) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
            self.dimension
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| RicordaError::StoreWrite(e.to_string()))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_notes_namespace ON notes (namespace)")
            .execute(&self.pool)
            .await
            .map_err(|e| RicordaError::StoreWrite(e.to_string()))?;

        if config.vector_indexes_enabled() {
            sqlx::query(&format!(
                r"
                CREATE INDEX IF NOT EXISTS idx_notes_embedding
                ON notes USING ivfflat (embedding vector_cosine_ops)
                WITH (lists = {})
                ",
                config.vector_index_lists()
            ))
            .execute(&self.pool)
            .await
            .map_err(|e| RicordaError::StoreWrite(e.to_string()))?;
        }

        info!("Notes schema initialized (dimension {})", self.dimension);
        Ok(())
    }

    /// Get a reference to the pool for raw queries
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn upsert(&self, namespace: &str, id: &str, vector: Vec<f32>, text: &str) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO notes (id, namespace, content, embedding)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
                SET namespace = EXCLUDED.namespace,
                    content = EXCLUDED.content,
                    embedding = EXCLUDED.embedding
            ",
        )
        .bind(id)
        .bind(namespace)
        .bind(text)
        .bind(Vector::from(vector))
        .execute(&self.pool)
        .await
        .map_err(|e| RicordaError::StoreWrite(e.to_string()))?;

        Ok(())
    }

    async fn query(&self, namespace: &str, vector: Vec<f32>, top_k: usize) -> Result<Vec<Match>> {
        let rows = sqlx::query_as::<_, (String, f64)>(
            r"
            SELECT content, 1 - (embedding <=> $1) AS score
            FROM notes
            WHERE namespace = $2
            ORDER BY embedding <=> $1
            LIMIT $3
            ",
        )
        .bind(Vector::from(vector))
        .bind(namespace)
        .bind(i64::try_from(top_k).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RicordaError::StoreQuery(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(text, score)| Match {
                text,
                score: score as f32,
            })
            .collect())
    }

    async fn delete_all(&self, namespace: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE namespace = $1")
            .bind(namespace)
            .execute(&self.pool)
            .await
            .map_err(|e| RicordaError::StoreWrite(e.to_string()))?;

        info!(
            "Deleted {} notes from namespace {}",
            result.rows_affected(),
            namespace
        );
        Ok(())
    }
}
