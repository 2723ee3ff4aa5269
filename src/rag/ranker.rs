//! Pure ranking of raw vector matches

use std::collections::HashSet;

use super::Match;
use super::RankedResult;

/// Rank raw matches into a deduplicated, thresholded short list
///
/// The store's own result order is not trusted: matches are re-sorted by
/// score descending, with ties keeping their original input order. Identical
/// note text retrieved under different vector ids collapses to one entry, and
/// empty text is dropped. Only candidates scoring at least `score_min` are
/// accepted, up to `k` of them.
///
/// When no candidate clears the threshold but at least one exists, the single
/// best candidate is returned with `above_threshold = false`, so callers can
/// tell "nothing stored" (empty list) apart from "nothing relevant enough"
/// (one below-threshold entry).
///
/// Total over all inputs: `k = 0` yields an empty list rather than an error.
pub fn rank(matches: &[Match], k: usize, score_min: f32) -> Vec<RankedResult> {
    if k == 0 {
        return Vec::new();
    }

    let mut ordered: Vec<&Match> = matches.iter().collect();
    // sort_by is stable, so equal scores keep their input order
    ordered.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for m in ordered {
        if m.text.is_empty() || !seen.insert(m.text.as_str()) {
            continue;
        }
        candidates.push(m);
    }

    let mut results: Vec<RankedResult> = candidates
        .iter()
        .filter(|m| m.score >= score_min)
        .take(k)
        .map(|m| RankedResult {
            text: m.text.clone(),
            score: m.score,
            above_threshold: true,
        })
        .collect();

    // Fallback: surface the best available candidate even below the threshold
    if results.is_empty() {
        if let Some(best) = candidates.first() {
            results.push(RankedResult {
                text: best.text.clone(),
                score: best.score,
                above_threshold: false,
            });
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(text: &str, score: f32) -> Match {
        Match {
            text: text.to_string(),
            score,
        }
    }

    #[test]
    fn test_duplicate_collapses_and_below_threshold_drops() {
        let matches = vec![m("a", 0.9), m("b", 0.5), m("a", 0.9)];
        let results = rank(&matches, 3, 0.6);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "a");
        assert!((results[0].score - 0.9).abs() < f32::EPSILON);
        assert!(results[0].above_threshold);
    }

    #[test]
    fn test_fallback_returns_single_best_below_threshold() {
        let matches = vec![m("x", 0.3)];
        let results = rank(&matches, 3, 0.6);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "x");
        assert!((results[0].score - 0.3).abs() < f32::EPSILON);
        assert!(!results[0].above_threshold);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(rank(&[], 3, 0.6).is_empty());
        assert!(rank(&[], 0, 0.0).is_empty());
    }

    #[test]
    fn test_tie_break_keeps_input_order_and_truncates_to_k() {
        let matches = vec![m("a", 0.7), m("b", 0.7), m("c", 0.8)];
        let results = rank(&matches, 2, 0.6);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "c");
        assert_eq!(results[1].text, "a");
        assert!(results.iter().all(|r| r.above_threshold));
    }

    #[test]
    fn test_fallback_picks_highest_scoring_deduplicated_candidate() {
        let matches = vec![m("low", 0.1), m("mid", 0.4), m("mid", 0.4), m("tiny", 0.05)];
        let results = rank(&matches, 3, 0.6);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "mid");
        assert!(!results[0].above_threshold);
    }

    #[test]
    fn test_k_zero_returns_empty_without_fallback() {
        let matches = vec![m("a", 0.9)];
        assert!(rank(&matches, 0, 0.6).is_empty());
    }

    #[test]
    fn test_zero_threshold_makes_fallback_unreachable() {
        let matches = vec![m("a", 0.2), m("b", 0.1)];
        let results = rank(&matches, 3, 0.0);

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.above_threshold));
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let matches = vec![m("", 0.95), m("a", 0.7)];
        let results = rank(&matches, 3, 0.6);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "a");
    }

    #[test]
    fn test_all_empty_text_yields_empty_output_not_fallback() {
        let matches = vec![m("", 0.95), m("", 0.4)];
        assert!(rank(&matches, 3, 0.6).is_empty());
    }

    #[test]
    fn test_output_is_sorted_unique_and_bounded() {
        let matches = vec![
            m("d", 0.61),
            m("a", 0.99),
            m("b", 0.75),
            m("a", 0.62),
            m("c", 0.75),
            m("e", 0.60),
        ];
        let results = rank(&matches, 4, 0.6);

        assert_eq!(results.len(), 4);
        // Sorted by score descending
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        // No two entries share text
        let texts: std::collections::HashSet<_> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts.len(), results.len());
        // Equal scores (b, c) keep input order
        assert_eq!(results[1].text, "b");
        assert_eq!(results[2].text, "c");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let matches = vec![m("edge", 0.6)];
        let results = rank(&matches, 3, 0.6);

        assert_eq!(results.len(), 1);
        assert!(results[0].above_threshold);
    }

    #[test]
    fn test_deterministic_for_fixed_input() {
        let matches = vec![m("a", 0.7), m("b", 0.7), m("c", 0.3), m("a", 0.9)];
        let first = rank(&matches, 3, 0.5);
        for _ in 0..10 {
            assert_eq!(rank(&matches, 3, 0.5), first);
        }
    }

    #[test]
    fn test_every_result_traces_to_an_input_match() {
        let matches = vec![m("a", 0.9), m("b", 0.2)];
        for (k, score_min) in [(1_usize, 0.6_f32), (3, 0.95), (2, 0.0)] {
            for r in rank(&matches, k, score_min) {
                assert!(matches.iter().any(|m| m.text == r.text && m.score == r.score));
            }
        }
    }
}
