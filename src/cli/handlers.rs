//! CLI command handlers

use std::io::Write;
use std::sync::Arc;

use crate::cli::output::*;
use crate::embeddings::EmbeddingService;
use crate::llm::Drafter;
use crate::llm::LlmClient;
use crate::rag::NoteStore;
use crate::session::Phase;
use crate::session::SessionStore;
use crate::store::PgVectorStore;
use crate::AppConfig;
use crate::Result;

/// Build the note store from configuration, or report what's missing
///
/// Returns `None` after printing a fixed message when the embedding service
/// or the vector store has no connection details; nothing is attempted in
/// that case.
async fn build_note_store(config: &AppConfig) -> Result<Option<NoteStore>> {
    if !config.embeddings_configured() {
        println!("Embedding service not configured. Set [embeddings] endpoint in config.toml.");
        return Ok(None);
    }
    if !config.store_configured() {
        println!("Vector store not configured. Set [store] url in config.toml.");
        return Ok(None);
    }

    let embedder = Arc::new(EmbeddingService::new(config)?);
    let store = PgVectorStore::from_config(config).await?;
    store.init_schema(config).await?;

    Ok(Some(NoteStore::from_services(
        config,
        embedder,
        Arc::new(store),
    )))
}

/// Handle remember command
pub async fn handle_remember_command(
    config: &AppConfig,
    namespace: &str,
    text: &str,
) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        println!("Nothing to remember: note text is empty.");
        return Ok(());
    }

    let Some(notes) = build_note_store(config).await? else {
        return Ok(());
    };

    let id = notes.remember(namespace, text).await?;
    println!("Remembered ✅ (id: {id})");

    Ok(())
}

/// Handle search command
pub async fn handle_search_command(
    config: &AppConfig,
    namespace: &str,
    query: &str,
    limit: Option<usize>,
    threshold: Option<f32>,
) -> Result<()> {
    let Some(notes) = build_note_store(config).await? else {
        return Ok(());
    };

    let k = limit.unwrap_or_else(|| config.result_count());
    let score_min = threshold.unwrap_or_else(|| config.score_min());

    let results = notes
        .search_with_options(namespace, query, k, score_min)
        .await?;
    print_search_results(&results);

    Ok(())
}

/// Handle forget command
pub async fn handle_forget_command(config: &AppConfig, namespace: &str, force: bool) -> Result<()> {
    if !force && !confirm(&format!(
        "Delete ALL notes in namespace '{namespace}'? This cannot be undone."
    ))? {
        println!("Aborted.");
        return Ok(());
    }

    let Some(notes) = build_note_store(config).await? else {
        return Ok(());
    };

    notes.forget(namespace).await?;
    println!("Cleared namespace '{namespace}'.");

    Ok(())
}

/// Handle draft command
pub async fn handle_draft_command(
    config: &AppConfig,
    brief: &str,
    namespace: &str,
    phase: Option<&str>,
    variants: usize,
) -> Result<()> {
    if !config.llm_configured() {
        println!("Caption drafter not configured. Set [llm] llm_endpoint in config.toml.");
        return Ok(());
    }

    let sessions = SessionStore::from_config(config);
    if let Some(phase) = phase {
        match phase.parse::<Phase>() {
            Ok(parsed) => sessions.set_phase(namespace, parsed),
            Err(e) => {
                println!("{e}");
                return Ok(());
            }
        }
    }
    let phase = sessions.phase_of(namespace);

    let drafter = Drafter::new(LlmClient::new(config)?);
    let drafts = drafter.draft(brief, phase, variants).await?;
    print_variants(&drafts, phase);

    Ok(())
}

/// Handle phase command
pub fn handle_phase_command(config: &AppConfig, namespace: &str, value: Option<&str>) {
    let sessions = SessionStore::from_config(config);

    let Some(value) = value else {
        println!("Current phase: {}", sessions.phase_of(namespace));
        return;
    };

    match value.parse::<Phase>() {
        Ok(phase) => {
            sessions.set_phase(namespace, phase);
            println!("Phase set: {phase}");
        }
        Err(e) => println!("{e}"),
    }
}

/// Handle status command
pub fn handle_status_command(config: &AppConfig) {
    print_status(config);
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
