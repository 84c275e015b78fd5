//! Three-state filter engine.
//!
//! ```text
//!              activate                 accept (non-empty result + query)
//! Unfiltered ───────────▶ Filtering ─────────────────────────────▶ FilterApplied
//!     ▲   ◀─────────────── │  ▲                                        │    │
//!     │   cancel / accept  │  └──────────── activate (resume) ─────────┘    │
//!     │   on empty result  │                                                │
//!     └────────────────────┴────────────────── clear ───────────────────────┘
//! ```
//!
//! Ranking never runs inline. [`FilterEngine::ranking_request`] snapshots the
//! master sequence and returns a [`RankingRequest`] that the list turns into a
//! deferred command; the result comes back later through
//! [`FilterEngine::deliver`]. Results are not tagged with the query that
//! produced them, so the last delivery wins even if it answers an older query.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::item::{FilteredItem, Item};
use crate::rank::{Ranker, SortedRanker};
use crate::store::ItemStore;

/// Current filtering state of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterState {
    /// No filter set; the master sequence is shown.
    #[default]
    Unfiltered,
    /// The user is editing the query.
    Filtering,
    /// A filter is applied and the user is not editing it.
    FilterApplied,
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FilterState::Unfiltered => "unfiltered",
            FilterState::Filtering => "filtering",
            FilterState::FilterApplied => "filter applied",
        })
    }
}

/// A snapshot of everything one ranking pass needs.
///
/// Owns copies of the master items and their filter keys, so it can be moved
/// into a detached task while the list keeps changing.
pub struct RankingRequest<I> {
    query: String,
    keys: Vec<String>,
    items: Vec<I>,
    ranker: Arc<dyn Ranker>,
}

impl<I: Item> RankingRequest<I> {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Run the ranking function and pair each rank with its item.
    ///
    /// An empty query yields every item with no match annotations. Ranks that
    /// point outside the snapshot are skipped.
    pub fn resolve(self) -> Vec<FilteredItem<I>> {
        if self.query.is_empty() {
            return self.items.into_iter().map(FilteredItem::unmatched).collect();
        }
        self.ranker
            .rank(&self.query, &self.keys)
            .into_iter()
            .filter_map(|rank| {
                self.items.get(rank.index).map(|item| FilteredItem {
                    item: item.clone(),
                    matches: rank.matched_indexes,
                })
            })
            .collect()
    }
}

/// Owns the query text, the filter state and the filtered sequence.
pub struct FilterEngine<I> {
    state: FilterState,
    query: String,
    filtered: Vec<FilteredItem<I>>,
    ranker: Arc<dyn Ranker>,
    enabled: bool,
}

impl<I: Item> Default for FilterEngine<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Item> FilterEngine<I> {
    /// An enabled, unfiltered engine using [`SortedRanker`].
    pub fn new() -> Self {
        Self {
            state: FilterState::Unfiltered,
            query: String::new(),
            filtered: Vec::new(),
            ranker: Arc::new(SortedRanker),
            enabled: true,
        }
    }

    /// Install a ranking policy. Takes effect on the next request.
    pub fn set_ranker(&mut self, ranker: impl Ranker) {
        self.ranker = Arc::new(ranker);
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The filtered sequence. Empty while unfiltered.
    pub fn filtered(&self) -> &[FilteredItem<I>] {
        &self.filtered
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable filtering. Disabling resets any active filter.
    ///
    /// Returns `true` if a filter was reset.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.enabled = enabled;
        !enabled && self.reset()
    }

    /// Match positions for the item at `index` of the filtered sequence.
    pub fn matches_for(&self, index: usize) -> &[usize] {
        self.filtered
            .get(index)
            .map(|fi| fi.matches.as_slice())
            .unwrap_or(&[])
    }

    /// Enter editing mode.
    ///
    /// Allowed from `Unfiltered` and `FilterApplied` when filtering is enabled
    /// and `master` is non-empty. With an empty query the filtered sequence is
    /// seeded with every master item so the view shows everything while the
    /// user types; a resumed filter keeps its query and results.
    pub fn activate(&mut self, master: &[I]) -> bool {
        if !self.enabled || master.is_empty() || self.state == FilterState::Filtering {
            return false;
        }
        if self.query.is_empty() {
            self.filtered = master.iter().cloned().map(FilteredItem::unmatched).collect();
        }
        self.transition(FilterState::Filtering);
        true
    }

    /// Replace the query text. Returns `true` if it changed.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.query {
            return false;
        }
        self.query = query;
        true
    }

    /// Snapshot the master sequence for a ranking pass against the current
    /// query.
    ///
    /// Always ranks the master sequence, never the previous results. Returns
    /// `None` while unfiltered.
    pub fn ranking_request(&self, master: &ItemStore<I>) -> Option<RankingRequest<I>> {
        if self.state == FilterState::Unfiltered {
            return None;
        }
        debug!(query = %self.query, targets = master.len(), "ranking requested");
        Some(RankingRequest {
            query: self.query.clone(),
            keys: master.filter_keys(),
            items: master.as_slice().to_vec(),
            ranker: Arc::clone(&self.ranker),
        })
    }

    /// Install a ranking result.
    ///
    /// Replaces the filtered sequence unconditionally while a filter is
    /// active. Late results that arrive after the filter was reset are
    /// dropped. An applied filter whose results come back empty reverts to
    /// `Unfiltered`.
    ///
    /// Returns `false` if the result was dropped.
    pub fn deliver(&mut self, matches: Vec<FilteredItem<I>>) -> bool {
        if self.state == FilterState::Unfiltered {
            debug!(matches = matches.len(), "dropping ranking result while unfiltered");
            return false;
        }
        debug!(matches = matches.len(), query = %self.query, "ranking result delivered");
        self.filtered = matches;
        if self.state == FilterState::FilterApplied && self.filtered.is_empty() {
            self.reset();
        }
        true
    }

    /// Leave editing mode, keeping the filter if it is meaningful.
    ///
    /// Does nothing unless filtering and `master_len > 0`. Falls back to
    /// `Unfiltered` when the filtered sequence is empty or the query is empty.
    pub fn accept(&mut self, master_len: usize) -> FilterState {
        if self.state != FilterState::Filtering || master_len == 0 {
            return self.state;
        }
        if self.filtered.is_empty() || self.query.is_empty() {
            self.reset();
        } else {
            self.transition(FilterState::FilterApplied);
        }
        self.state
    }

    /// Drop the query and filtered sequence and return to `Unfiltered`.
    ///
    /// Returns `false` if already unfiltered.
    pub fn reset(&mut self) -> bool {
        if self.state == FilterState::Unfiltered {
            return false;
        }
        self.query.clear();
        self.filtered.clear();
        self.transition(FilterState::Unfiltered);
        true
    }

    fn transition(&mut self, to: FilterState) {
        debug!(from = %self.state, to = %to, query = %self.query, "filter state changed");
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::UnsortedRanker;

    const FRUIT: [&str; 5] = ["apple", "banana", "cherry", "date", "elderberry"];

    fn fruit_store() -> ItemStore<&'static str> {
        ItemStore::new(FRUIT.to_vec())
    }

    fn values(items: &[FilteredItem<&'static str>]) -> Vec<&'static str> {
        items.iter().map(|fi| fi.item).collect()
    }

    #[test]
    fn display_names() {
        assert_eq!(FilterState::Unfiltered.to_string(), "unfiltered");
        assert_eq!(FilterState::Filtering.to_string(), "filtering");
        assert_eq!(FilterState::FilterApplied.to_string(), "filter applied");
    }

    #[test]
    fn activate_seeds_every_item_when_query_empty() {
        let mut f = FilterEngine::new();
        assert!(f.activate(&FRUIT));
        assert_eq!(f.state(), FilterState::Filtering);
        assert_eq!(f.filtered().len(), 5);
        assert!(f.filtered().iter().all(|fi| fi.matches.is_empty()));
    }

    #[test]
    fn activate_refused_on_empty_master_or_disabled() {
        let mut f: FilterEngine<&'static str> = FilterEngine::new();
        assert!(!f.activate(&[]));
        assert_eq!(f.state(), FilterState::Unfiltered);

        let mut f = FilterEngine::new();
        f.set_enabled(false);
        assert!(!f.activate(&FRUIT));
    }

    #[test]
    fn request_ranks_master_not_previous_results() {
        let mut f = FilterEngine::new();
        f.activate(&FRUIT);
        f.set_query("an");
        let req = f.ranking_request(&fruit_store()).unwrap();
        assert_eq!(req.keys(), fruit_store().filter_keys().as_slice());
        f.deliver(req.resolve());
        assert_eq!(values(f.filtered()), vec!["banana"]);

        f.set_query("e");
        let req = f.ranking_request(&fruit_store()).unwrap();
        let got = values(&req.resolve());
        assert!(got.contains(&"apple"));
        assert!(got.contains(&"cherry"));
    }

    #[test]
    fn empty_query_request_returns_everything() {
        let mut f = FilterEngine::new();
        f.activate(&FRUIT);
        let req = f.ranking_request(&fruit_store()).unwrap();
        assert_eq!(req.resolve().len(), 5);
    }

    #[test]
    fn no_request_while_unfiltered() {
        let f: FilterEngine<&'static str> = FilterEngine::new();
        assert!(f.ranking_request(&fruit_store()).is_none());
    }

    #[test]
    fn accept_with_results_applies() {
        let mut f = FilterEngine::new();
        f.activate(&FRUIT);
        f.set_query("ban");
        let req = f.ranking_request(&fruit_store()).unwrap();
        f.deliver(req.resolve());
        assert_eq!(f.accept(FRUIT.len()), FilterState::FilterApplied);
        assert_eq!(f.query(), "ban");
    }

    #[test]
    fn accept_with_empty_query_reverts() {
        let mut f = FilterEngine::new();
        f.activate(&FRUIT);
        assert_eq!(f.accept(FRUIT.len()), FilterState::Unfiltered);
        assert!(f.filtered().is_empty());
    }

    #[test]
    fn accept_with_no_matches_reverts() {
        let mut f = FilterEngine::new();
        f.activate(&FRUIT);
        f.set_query("xyz");
        let req = f.ranking_request(&fruit_store()).unwrap();
        f.deliver(req.resolve());
        assert!(f.filtered().is_empty());
        assert_eq!(f.accept(FRUIT.len()), FilterState::Unfiltered);
        assert_eq!(f.query(), "");
    }

    #[test]
    fn resume_keeps_query_and_results() {
        let mut f = FilterEngine::new();
        f.activate(&FRUIT);
        f.set_query("err");
        let req = f.ranking_request(&fruit_store()).unwrap();
        f.deliver(req.resolve());
        f.accept(FRUIT.len());
        let before = values(f.filtered());

        assert!(f.activate(&FRUIT));
        assert_eq!(f.state(), FilterState::Filtering);
        assert_eq!(f.query(), "err");
        assert_eq!(values(f.filtered()), before);
    }

    #[test]
    fn late_result_after_reset_is_dropped() {
        let mut f = FilterEngine::new();
        f.activate(&FRUIT);
        f.set_query("a");
        let req = f.ranking_request(&fruit_store()).unwrap();
        f.reset();
        assert!(!f.deliver(req.resolve()));
        assert!(f.filtered().is_empty());
    }

    #[test]
    fn stale_result_overwrites_fresher_one() {
        let mut f = FilterEngine::new();
        f.activate(&FRUIT);
        f.set_query("a");
        let older = f.ranking_request(&fruit_store()).unwrap();
        f.set_query("ban");
        let newer = f.ranking_request(&fruit_store()).unwrap();

        f.deliver(newer.resolve());
        f.deliver(older.resolve());
        // Last write wins: the view reflects "a" although the query is "ban".
        assert_eq!(f.query(), "ban");
        assert!(f.filtered().len() > 1);
    }

    #[test]
    fn empty_delivery_while_applied_reverts() {
        let mut f = FilterEngine::new();
        f.activate(&FRUIT);
        f.set_query("ch");
        let req = f.ranking_request(&fruit_store()).unwrap();
        f.deliver(req.resolve());
        f.accept(FRUIT.len());
        assert_eq!(f.state(), FilterState::FilterApplied);

        f.deliver(vec![]);
        assert_eq!(f.state(), FilterState::Unfiltered);
    }

    #[test]
    fn disabling_resets_filter() {
        let mut f = FilterEngine::new();
        f.activate(&FRUIT);
        assert!(f.set_enabled(false));
        assert_eq!(f.state(), FilterState::Unfiltered);
    }

    #[test]
    fn ranker_is_swappable() {
        let mut f = FilterEngine::new();
        f.set_ranker(UnsortedRanker);
        f.activate(&["a_x_b_x_c", "abc"]);
        f.set_query("abc");
        let req = f.ranking_request(&ItemStore::new(vec!["a_x_b_x_c", "abc"])).unwrap();
        assert_eq!(values(&req.resolve()), vec!["a_x_b_x_c", "abc"]);
    }

    #[test]
    fn bad_rank_indexes_are_skipped() {
        let mut f = FilterEngine::new();
        f.set_ranker(|_: &str, _: &[String]| {
            vec![crate::rank::Rank {
                index: 99,
                matched_indexes: vec![],
            }]
        });
        f.activate(&FRUIT);
        f.set_query("a");
        let req = f.ranking_request(&fruit_store()).unwrap();
        assert!(req.resolve().is_empty());
    }

    #[test]
    fn matches_for_out_of_range_is_empty() {
        let f: FilterEngine<&'static str> = FilterEngine::new();
        assert!(f.matches_for(3).is_empty());
    }
}
