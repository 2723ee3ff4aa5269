//! In-process vector store with brute-force cosine similarity

use async_trait::async_trait;
use dashmap::DashMap;

use super::VectorStore;
use crate::errors::Result;
use crate::rag::Match;

#[derive(Debug, Clone)]
struct StoredNote {
    id: String,
    text: String,
    vector: Vec<f32>,
}

/// Vector store keeping every note in process memory
///
/// Exact nearest-neighbor by scanning the namespace; good enough for tests
/// and small local runs, with the same contract as the Postgres store.
#[derive(Default)]
pub struct InMemoryStore {
    namespaces: DashMap<String, Vec<StoredNote>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notes currently stored in a namespace
    pub fn len(&self, namespace: &str) -> usize {
        self.namespaces.get(namespace).map_or(0, |n| n.len())
    }

    pub fn is_empty(&self, namespace: &str) -> bool {
        self.len(namespace) == 0
    }
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn upsert(&self, namespace: &str, id: &str, vector: Vec<f32>, text: &str) -> Result<()> {
        let mut notes = self.namespaces.entry(namespace.to_string()).or_default();

        let note = StoredNote {
            id: id.to_string(),
            text: text.to_string(),
            vector,
        };

        if let Some(existing) = notes.iter_mut().find(|n| n.id == id) {
            *existing = note;
        } else {
            notes.push(note);
        }

        Ok(())
    }

    async fn query(&self, namespace: &str, vector: Vec<f32>, top_k: usize) -> Result<Vec<Match>> {
        let Some(notes) = self.namespaces.get(namespace) else {
            return Ok(Vec::new());
        };

        let mut scored: Vec<Match> = notes
            .iter()
            .map(|n| Match {
                text: n.text.clone(),
                score: cosine_similarity(&n.vector, &vector),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);

        Ok(scored)
    }

    async fn delete_all(&self, namespace: &str) -> Result<()> {
        self.namespaces.remove(namespace);
        Ok(())
    }
}

/// Cosine similarity of two vectors; 0.0 for zero-length or mismatched inputs
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_is_idempotent_per_id() {
        let store = InMemoryStore::new();

        store
            .upsert("ns", "note-1", vec![1.0, 0.0], "first")
            .await
            .unwrap();
        store
            .upsert("ns", "note-1", vec![0.0, 1.0], "replaced")
            .await
            .unwrap();

        assert_eq!(store.len("ns"), 1);
        let matches = store.query("ns", vec![0.0, 1.0], 5).await.unwrap();
        assert_eq!(matches[0].text, "replaced");
    }

    #[tokio::test]
    async fn test_query_orders_by_similarity_and_truncates() {
        let store = InMemoryStore::new();
        store.upsert("ns", "a", vec![1.0, 0.0], "east").await.unwrap();
        store.upsert("ns", "b", vec![0.0, 1.0], "north").await.unwrap();
        store
            .upsert("ns", "c", vec![0.7, 0.7], "northeast")
            .await
            .unwrap();

        let matches = store.query("ns", vec![1.0, 0.0], 2).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text, "east");
        assert_eq!(matches[1].text, "northeast");
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let store = InMemoryStore::new();
        store.upsert("chat-1", "a", vec![1.0], "mine").await.unwrap();
        store.upsert("chat-2", "b", vec![1.0], "theirs").await.unwrap();

        let matches = store.query("chat-1", vec![1.0], 10).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "mine");

        store.delete_all("chat-1").await.unwrap();
        assert!(store.is_empty("chat-1"));
        assert_eq!(store.len("chat-2"), 1);
    }

    #[test]
    fn test_cosine_similarity_edge_cases() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }
}
