//! Master item sequence with positional, self-clamping mutations.

use crate::error::ListError;
use crate::item::Item;

/// Owns the master ordered sequence of items.
///
/// Every operation except [`replace_at`](ItemStore::replace_at) normalizes
/// out-of-range positions instead of failing: inserts past the end append,
/// removals past the end do nothing, swaps clamp both positions.
#[derive(Debug, Clone)]
pub struct ItemStore<I> {
    items: Vec<I>,
}

impl<I> Default for ItemStore<I> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<I: Item> ItemStore<I> {
    pub fn new(items: Vec<I>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&I> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[I] {
        &self.items
    }

    /// Replace the whole sequence.
    pub fn set_all(&mut self, items: Vec<I>) {
        self.items = items;
    }

    /// Insert `item` at `index`, shifting the suffix right.
    ///
    /// An index at or past the end appends.
    pub fn insert_at(&mut self, index: usize, item: I) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Remove the item at `index`, shifting the suffix left.
    ///
    /// Returns `None` without touching the store when `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<I> {
        if index >= self.items.len() {
            return None;
        }
        Some(self.items.remove(index))
    }

    /// Overwrite the item at an existing position.
    pub fn replace_at(&mut self, index: usize, item: I) -> Result<(), ListError> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = item;
                Ok(())
            }
            None => Err(ListError::OutOfRange { index, len }),
        }
    }

    /// Swap two positions after clamping both into `[0, len - 1]`.
    ///
    /// Returns `false` on an empty store.
    pub fn swap_adjacent(&mut self, first: usize, second: usize) -> bool {
        let Some(max) = self.items.len().checked_sub(1) else {
            return false;
        };
        self.items.swap(first.min(max), second.min(max));
        true
    }

    /// Snapshot of every filter value, positionally aligned with the store.
    pub fn filter_keys(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.filter_value().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(items: &[&'static str]) -> ItemStore<&'static str> {
        ItemStore::new(items.to_vec())
    }

    #[test]
    fn insert_past_end_appends() {
        let mut s = store(&["a", "b", "c"]);
        s.insert_at(10, "z");
        assert_eq!(s.as_slice(), &["a", "b", "c", "z"]);
    }

    #[test]
    fn insert_shifts_suffix() {
        let mut s = store(&["a", "c"]);
        s.insert_at(1, "b");
        assert_eq!(s.as_slice(), &["a", "b", "c"]);
    }

    #[test]
    fn insert_into_empty_store() {
        let mut s = store(&[]);
        s.insert_at(3, "only");
        assert_eq!(s.as_slice(), &["only"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut s = store(&["a"]);
        assert_eq!(s.remove_at(1), None);
        assert_eq!(s.len(), 1);

        let mut empty = store(&[]);
        assert_eq!(empty.remove_at(0), None);
    }

    #[test]
    fn remove_shifts_suffix() {
        let mut s = store(&["a", "b", "c"]);
        assert_eq!(s.remove_at(0), Some("a"));
        assert_eq!(s.as_slice(), &["b", "c"]);
    }

    #[test]
    fn replace_out_of_range_errors() {
        let mut s = store(&["a", "b"]);
        assert_eq!(
            s.replace_at(2, "x"),
            Err(ListError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(s.as_slice(), &["a", "b"]);
    }

    #[test]
    fn replace_in_range() {
        let mut s = store(&["a", "b"]);
        s.replace_at(1, "x").unwrap();
        assert_eq!(s.as_slice(), &["a", "x"]);
    }

    #[test]
    fn swap_clamps_positions() {
        let mut s = store(&["a", "b", "c"]);
        assert!(s.swap_adjacent(2, 3)); // 3 clamps to 2: no change
        assert_eq!(s.as_slice(), &["a", "b", "c"]);
        assert!(s.swap_adjacent(0, 1));
        assert_eq!(s.as_slice(), &["b", "a", "c"]);
    }

    #[test]
    fn swap_on_empty_store() {
        let mut s = store(&[]);
        assert!(!s.swap_adjacent(0, 1));
    }

    #[test]
    fn filter_keys_align_with_items() {
        let s = store(&["Apple", "Banana"]);
        assert_eq!(s.filter_keys(), vec!["Apple".to_string(), "Banana".to_string()]);
    }
}
