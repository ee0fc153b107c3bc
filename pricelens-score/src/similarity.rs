//! Edit-distance string similarity between tag names.
//!
//! Used to penalize candidate tags that are lexically close to a tag the
//! user has already selected ("goretex" vs "gore-tex"): such candidates
//! rarely add information and would otherwise crowd the top of the list.

use crate::thresholds;

/// Classic Levenshtein distance: insertion, deletion and substitution each
/// cost 1. Operates on chars, not bytes, so Swedish tag names ("blåräven")
/// are measured correctly.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row dynamic program keeps memory at O(len(b)).
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        prev.copy_from_slice(&curr);
    }

    prev[b.len()]
}

/// Normalized similarity between two tag names, in [0, 100].
///
/// Names are lower-cased before comparison; similarity is the share of the
/// longer name not consumed by edits. Two empty names are identical (100).
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100.0;
    }
    let dist = levenshtein(&a, &b);
    (max_len - dist) as f64 / max_len as f64 * 100.0
}

/// Bucketed score penalty for a candidate name against the selected tags.
///
/// The penalty is driven by the *maximum* similarity against any selected
/// name, so one near-duplicate selection is enough to demote a candidate.
/// Returns 0 for an empty selection.
pub fn similarity_penalty(name: &str, selected_names: &[&str]) -> i32 {
    let best = selected_names
        .iter()
        .map(|s| name_similarity(name, s))
        .fold(0.0f64, f64::max);

    if best >= thresholds::SIMILARITY_HEAVY {
        -6
    } else if best >= thresholds::SIMILARITY_STRONG {
        -4
    } else if best >= thresholds::SIMILARITY_MODERATE {
        -2
    } else if best >= thresholds::SIMILARITY_MILD {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_score_100() {
        assert_eq!(name_similarity("nike", "nike"), 100.0);
        assert_eq!(name_similarity("gore-tex", "gore-tex"), 100.0);
    }

    #[test]
    fn empty_names_are_identical() {
        assert_eq!(name_similarity("", ""), 100.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        let pairs = [("goretex", "gore-tex"), ("jordan", "air jordan"), ("a", "b")];
        for (a, b) in pairs {
            assert_eq!(name_similarity(a, b), name_similarity(b, a));
        }
    }

    #[test]
    fn similarity_is_case_insensitive() {
        assert_eq!(name_similarity("Nike", "nike"), 100.0);
    }

    #[test]
    fn completely_different_names_score_low() {
        // "abc" vs "xyz": 3 substitutions over max length 3 => 0
        assert_eq!(name_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn levenshtein_counts_single_edit() {
        assert_eq!(levenshtein("kitten", "sitten"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn levenshtein_handles_multibyte_chars() {
        // One substitution over chars, not bytes.
        assert_eq!(levenshtein("blå", "bla"), 1);
    }

    #[test]
    fn near_duplicate_of_selection_gets_strong_penalty() {
        // "goretex" vs "gore-tex": distance 1 over max length 8
        // => similarity 87.5 => heaviest band
        let penalty = similarity_penalty("gore-tex", &["goretex"]);
        assert_eq!(penalty, -6);
    }

    #[test]
    fn dissimilar_candidate_gets_no_penalty() {
        assert_eq!(similarity_penalty("vintage", &["goretex"]), 0);
    }

    #[test]
    fn empty_selection_gets_no_penalty() {
        assert_eq!(similarity_penalty("anything", &[]), 0);
    }

    #[test]
    fn max_over_selection_drives_the_penalty() {
        // The dissimilar selected name must not dilute the near-duplicate.
        let penalty = similarity_penalty("gore-tex", &["vintage", "goretex"]);
        assert_eq!(penalty, -6);
    }
}
