//! Caption drafting through an OpenAI-compatible chat endpoint
//!
//! The drafter is a pluggable collaborator, not a core subsystem: it builds a
//! short per-language system prompt, asks for a handful of caption variants,
//! and parses the reply on a best-effort basis. When the reply doesn't look
//! like a variant list, the raw text comes back as a single variant rather
//! than an error.

pub mod client;
pub mod drafter;
pub mod variants;

pub use client::LlmClient;
pub use drafter::Drafter;
pub use variants::split_variants;

use serde::Deserialize;
use serde::Serialize;

/// Chat message in an LLM conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}
