//! Pluggable ranking functions.
//!
//! A [`Ranker`] maps a query and a list of target strings to the subset of
//! targets that match, each annotated with the positions that matched. Two
//! fuzzy policies ship with the crate:
//!
//! - [`SortedRanker`] orders matches by descending score; equal scores keep
//!   their input order.
//! - [`UnsortedRanker`] keeps matches in input order.
//!
//! Both treat the query as one literal subsequence: no fzf operators, and
//! whitespace is matched like any other character.
//!
//! Any `Fn(&str, &[String]) -> Vec<Rank>` is also a ranker.

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// One matched target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    /// Position of the target in the input slice.
    pub index: usize,
    /// Char indices of the matched characters, ascending.
    pub matched_indexes: Vec<usize>,
}

/// Maps a query and a list of targets to ranked matches.
///
/// Implementations run off the event loop inside a deferred command, so they
/// must be `Send + Sync` and should not touch shared mutable state.
pub trait Ranker: Send + Sync + 'static {
    fn rank(&self, query: &str, targets: &[String]) -> Vec<Rank>;
}

impl<F> Ranker for F
where
    F: Fn(&str, &[String]) -> Vec<Rank> + Send + Sync + 'static,
{
    fn rank(&self, query: &str, targets: &[String]) -> Vec<Rank> {
        self(query, targets)
    }
}

/// Fuzzy ranking ordered by match quality. The default policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedRanker;

impl Ranker for SortedRanker {
    fn rank(&self, query: &str, targets: &[String]) -> Vec<Rank> {
        let mut scored = fuzzy_find(query, targets);
        // `sort_by` is stable: ties keep input order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, rank)| rank).collect()
    }
}

/// Fuzzy matching without ordering by quality.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsortedRanker;

impl Ranker for UnsortedRanker {
    fn rank(&self, query: &str, targets: &[String]) -> Vec<Rank> {
        fuzzy_find(query, targets)
            .into_iter()
            .map(|(_, rank)| rank)
            .collect()
    }
}

/// Case-insensitive fuzzy match of `query` against every target, in input
/// order, paired with each match's score.
fn fuzzy_find(query: &str, targets: &[String]) -> Vec<(u16, Rank)> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let atom = Atom::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
        false,
    );
    let mut buf = Vec::new();
    let mut indices = Vec::new();

    targets
        .iter()
        .enumerate()
        .filter_map(|(index, target)| {
            indices.clear();
            let haystack = Utf32Str::new(target, &mut buf);
            let score = atom.indices(haystack, &mut matcher, &mut indices)?;
            Some((
                score,
                Rank {
                    index,
                    matched_indexes: indices.iter().map(|&i| i as usize).collect(),
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn indexes(ranks: &[Rank]) -> Vec<usize> {
        ranks.iter().map(|r| r.index).collect()
    }

    #[test]
    fn non_matching_targets_are_dropped() {
        let t = targets(&["apple", "banana", "cherry"]);
        let ranks = SortedRanker.rank("xyz", &t);
        assert!(ranks.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let t = targets(&["Apple", "banana"]);
        let ranks = UnsortedRanker.rank("APP", &t);
        assert_eq!(indexes(&ranks), vec![0]);
    }

    #[test]
    fn matched_positions_point_at_chars() {
        let t = targets(&["banana"]);
        let ranks = UnsortedRanker.rank("bn", &t);
        assert_eq!(ranks.len(), 1);
        let m = &ranks[0].matched_indexes;
        assert_eq!(m.len(), 2);
        assert_eq!(m[0], 0);
        assert!(m.windows(2).all(|w| w[0] < w[1]));
        let chars: Vec<char> = "banana".chars().collect();
        assert_eq!(chars[m[1]], 'n');
    }

    #[test]
    fn sorted_puts_better_match_first() {
        // A contiguous prefix match outranks a scattered one.
        let t = targets(&["a_x_b_x_c", "abc"]);
        let ranks = SortedRanker.rank("abc", &t);
        assert_eq!(indexes(&ranks), vec![1, 0]);
    }

    #[test]
    fn unsorted_keeps_input_order() {
        let t = targets(&["a_x_b_x_c", "abc"]);
        let ranks = UnsortedRanker.rank("abc", &t);
        assert_eq!(indexes(&ranks), vec![0, 1]);
    }

    #[test]
    fn sorted_is_stable_for_equal_scores() {
        let t = targets(&["dog", "cat", "dog", "dog"]);
        let ranks = SortedRanker.rank("dog", &t);
        assert_eq!(indexes(&ranks), vec![0, 2, 3]);
    }

    #[test]
    fn bang_is_a_literal_char() {
        let t = targets(&["apple", "banana", "cherry", "a b", "!ab"]);
        let ranks = UnsortedRanker.rank("!a", &t);
        assert_eq!(indexes(&ranks), vec![4]);
        assert_eq!(ranks[0].matched_indexes, vec![0, 1]);
    }

    #[test]
    fn anchors_are_literal_chars() {
        let t = targets(&["apple", "^apple", "apple$"]);
        assert_eq!(indexes(&UnsortedRanker.rank("^a", &t)), vec![1]);
        assert_eq!(indexes(&UnsortedRanker.rank("e$", &t)), vec![2]);
        assert!(UnsortedRanker.rank("'app", &t).is_empty());
    }

    #[test]
    fn whitespace_is_matched_not_split() {
        let t = targets(&["apple", "banana", "cherry", "a b"]);
        let ranks = SortedRanker.rank("a b", &t);
        assert_eq!(indexes(&ranks), vec![3]);
        assert_eq!(ranks[0].matched_indexes, vec![0, 1, 2]);
    }

    #[test]
    fn spaces_only_query_needs_spaces() {
        let t = targets(&["apple", "banana", "cherry", "a b"]);
        assert!(UnsortedRanker.rank("  ", &t).is_empty());
        let ranks = UnsortedRanker.rank(" ", &t);
        assert_eq!(indexes(&ranks), vec![3]);
        assert_eq!(ranks[0].matched_indexes, vec![1]);
    }

    #[test]
    fn closures_are_rankers() {
        let exact = |query: &str, targets: &[String]| -> Vec<Rank> {
            targets
                .iter()
                .enumerate()
                .filter(|(_, t)| t.as_str() == query)
                .map(|(index, _)| Rank {
                    index,
                    matched_indexes: vec![],
                })
                .collect()
        };
        let t = targets(&["a", "b", "a"]);
        assert_eq!(indexes(&exact.rank("a", &t)), vec![0, 2]);
    }
}
