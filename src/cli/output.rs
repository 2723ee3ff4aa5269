//! CLI output formatting utilities

use crate::rag::RankedResult;
use crate::session::Phase;
use crate::AppConfig;

/// Truncate a string to `max_chars` characters, appending "..." when cut
///
/// Counts characters rather than bytes so multi-byte text never splits mid
/// character.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Print ranked search results
pub fn print_search_results(results: &[RankedResult]) {
    if results.is_empty() {
        println!("No results.");
        return;
    }

    for result in results {
        println!(
            "• {}\n  (score: {:.3})",
            truncate_str(&result.text, 200),
            result.score
        );
    }

    if results.iter().any(|r| !r.above_threshold) {
        println!("\n(no match above threshold; showing best available)");
    }
}

/// Print drafted caption variants
pub fn print_variants(variants: &[String], phase: Phase) {
    if variants.is_empty() {
        println!("The drafter returned nothing.");
        return;
    }

    println!("Drafts ({phase}):");
    for (idx, variant) in variants.iter().enumerate() {
        println!("  {}. {}", idx + 1, variant);
    }
}

/// Print configuration status, one line per collaborator
pub fn print_status(config: &AppConfig) {
    let check = |ok: bool| if ok { "ok" } else { "no" };

    println!("Default phase: {}", config.default_phase().to_uppercase());
    println!(
        "Embeddings: {} ({}, dim {})",
        check(config.embeddings_configured()),
        config.embedding_model(),
        config.embedding_dimension()
    );
    println!("Vector store: {}", check(config.store_configured()));
    println!(
        "Drafter: {} ({})",
        check(config.llm_configured()),
        config.llm_model()
    );
    println!(
        "Search: score_min {:.2}, results {}",
        config.score_min(),
        config.result_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_respects_char_boundaries() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 3), "hel...");
        // Multi-byte characters don't panic
        assert_eq!(truncate_str("héllo wörld", 5), "héllo...");
    }
}
