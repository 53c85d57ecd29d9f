// Candidate filter - narrows completion candidates to what the user has typed
// Prefix matches rank first, then in-order subsequence matches by similarity

use crate::snippets::CompletionCandidate;
use strsim::jaro_winkler;

/// Score assigned to a prefix match; subsequence matches score below 1.0
const PREFIX_SCORE: f64 = 2.0;

/// True when every char of `needle` appears in `haystack` in order
fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars();
    needle.chars().all(|n| hay.any(|h| h == n))
}

fn score(typed: &str, trigger: &str) -> Option<f64> {
    let typed = typed.to_lowercase();
    let trigger = trigger.to_lowercase();
    if trigger.starts_with(&typed) {
        Some(PREFIX_SCORE)
    } else if is_subsequence(&typed, &trigger) {
        Some(jaro_winkler(&typed, &trigger))
    } else {
        None
    }
}

/// Filter and rank `candidates` against the typed word.
///
/// An empty word keeps every candidate in collection order. Ties keep
/// collection order.
pub fn filter_candidates(typed: &str, candidates: &[CompletionCandidate]) -> Vec<CompletionCandidate> {
    if typed.is_empty() {
        return candidates.to_vec();
    }

    let mut scored: Vec<(f64, &CompletionCandidate)> = candidates
        .iter()
        .filter_map(|c| score(typed, &c.trigger).map(|s| (s, c)))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, c)| c.clone()).collect()
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
