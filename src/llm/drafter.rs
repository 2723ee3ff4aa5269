//! Caption drafter built on the chat completion client

use tracing::info;

use super::client::LlmClient;
use super::variants::split_variants;
use super::ChatMessage;
use crate::errors::Result;
use crate::session::Phase;

/// Default number of caption variants requested per brief
pub const DEFAULT_VARIANTS: usize = 3;

const SYSTEM_IT: &str = "Sei l'editor del canale. Tono: criptico, selettivo, anti-hype. \
                         Frasi brevi, pause. Non spiegare mai il concetto.";
const SYSTEM_EN: &str = "You are the channel's editor. Tone: cryptic, selective, anti-hype. \
                         Short lines. Never explain the concept.";

/// Drafts short branded captions from a brief
pub struct Drafter {
    client: LlmClient,
}

impl Drafter {
    pub const fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Draft caption variants for a brief in the conversation's language
    ///
    /// # Errors
    /// - LLM generation failures (API errors, rate limits, empty responses)
    pub async fn draft(&self, brief: &str, phase: Phase, count: usize) -> Result<Vec<String>> {
        let system = match phase {
            Phase::It => SYSTEM_IT,
            Phase::En => SYSTEM_EN,
        };

        let count = count.max(1);
        let messages = [
            ChatMessage::system(system),
            ChatMessage::user(format!(
                "{brief}\n\nWrite {count} numbered caption variants."
            )),
        ];

        let raw = self
            .client
            .generate_with_params(&messages, 0.8, 180 * count)
            .await?;

        let variants = split_variants(&raw, count);
        info!(
            "Drafted {} caption variant(s) with {}",
            variants.len(),
            self.client.model()
        );

        Ok(variants)
    }
}
