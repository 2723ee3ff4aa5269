//! Retrieval module: ranking raw vector matches into displayable results
//!
//! This module owns the decision logic of semantic note search:
//! - Deduplication of identical note text retrieved under different ids
//! - Similarity thresholding with a deterministic best-effort fallback
//! - Orchestration of embed -> query -> rank for the note store
//!
//! # Examples
//!
//! ```rust
//! use ricorda::rag::{rank, Match};
//!
//! let matches = vec![
//!     Match { text: "ship friday".to_string(), score: 0.91 },
//!     Match { text: "ship friday".to_string(), score: 0.91 },
//!     Match { text: "buy milk".to_string(), score: 0.40 },
//! ];
//!
//! let results = rank(&matches, 3, 0.60);
//! assert_eq!(results.len(), 1);
//! assert!(results[0].above_threshold);
//! ```

pub mod notes;
pub mod ranker;

pub use notes::NoteStore;
pub use ranker::rank;

/// A raw nearest-neighbor candidate, before ranking and deduplication
///
/// Scores are cosine-similarity-like: in `[0, 1]`, higher means more similar.
/// Matches are ephemeral, produced per query and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub text: String,
    pub score: f32,
}

/// A post-processed match ready for display
///
/// `above_threshold` distinguishes a real hit from the best-effort fallback
/// shown when nothing cleared the configured similarity threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub text: String,
    pub score: f32,
    pub above_threshold: bool,
}
