//! Token selection — keyword scoring pass and cumulative-threshold cut.
//!
//! Matching is plain substring containment on the lowercased text, so a
//! keyword also matches inside longer words ("men" in "women").

use serde::Serialize;
use std::collections::HashSet;

use crate::keywords::LanguageKeywords;
use crate::scoring::{Bucket, Scorer};

/// Number of leading words scored when no keyword matches.
pub const FALLBACK_WORDS: usize = 5;

/// Cleaned fallback words must be longer than this.
const FALLBACK_MIN_LEN: usize = 2;

/// A token with its simulated importance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredToken {
    pub token: String,
    pub score: f64,
    pub bucket: Bucket,
}

/// Score every keyword found in `text`, in first-scored order.
///
/// Lists are scanned high, medium, then sexist indicators; a keyword
/// already scored is never rescored. When nothing matches, the first
/// [`FALLBACK_WORDS`] whitespace-separated words are cleaned to ASCII
/// letters and scored in the fallback bucket if longer than two letters.
pub fn score_tokens<S: Scorer + ?Sized>(
    text: &str,
    keywords: &LanguageKeywords,
    scorer: &mut S,
) -> Vec<ScoredToken> {
    let haystack = text.to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut scored = Vec::new();

    for (bucket, list) in keywords.buckets() {
        for keyword in list {
            if haystack.contains(keyword.as_str()) && seen.insert(keyword.clone()) {
                scored.push(ScoredToken {
                    token: keyword.clone(),
                    score: scorer.score(bucket),
                    bucket,
                });
            }
        }
    }

    if scored.is_empty() {
        for word in haystack.split_whitespace().take(FALLBACK_WORDS) {
            let clean: String = word.chars().filter(char::is_ascii_alphabetic).collect();
            if clean.len() > FALLBACK_MIN_LEN && seen.insert(clean.clone()) {
                scored.push(ScoredToken {
                    token: clean,
                    score: scorer.score(Bucket::Fallback),
                    bucket: Bucket::Fallback,
                });
            }
        }
        tracing::debug!(fallback_tokens = scored.len(), "no keyword matched, scored leading words");
    } else {
        tracing::debug!(matched = scored.len(), "scored keyword matches");
    }

    scored
}

/// Pick tokens by descending score until their normalised cumulative
/// share reaches `threshold` or `max_tokens` are held.
///
/// The token that crosses the threshold is kept. Equal scores keep their
/// first-scored order. A zero total contributes nothing to the running sum,
/// so selection then runs to the cap.
pub fn select_by_cumulative(
    mut scored: Vec<ScoredToken>,
    threshold: f64,
    max_tokens: usize,
) -> Vec<String> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let total: f64 = scored.iter().map(|s| s.score).sum();
    let mut cumulative = 0.0;
    let mut selected = Vec::new();

    for entry in scored {
        if total > 0.0 {
            cumulative += entry.score / total;
        }
        selected.push(entry.token);
        if cumulative >= threshold || selected.len() >= max_tokens {
            break;
        }
    }

    selected
}
