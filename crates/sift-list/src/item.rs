//! The item contract and the filtered-item pairing.

use std::sync::Arc;

/// Trait for types that can be displayed in a list.
///
/// Any domain type can implement this trait to be used directly with
/// [`List`](crate::List). Only the filter value is required; it is the string
/// fuzzy matching runs against.
///
/// Items are cloned into ranking snapshots, so large types are best stored
/// behind an [`Arc`], which implements `Item` whenever its contents do.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone)]
/// struct Task {
///     title: String,
///     done: bool,
/// }
///
/// impl sift_list::Item for Task {
///     fn filter_value(&self) -> &str {
///         &self.title
///     }
/// }
/// ```
pub trait Item: Clone + Send + Sync + 'static {
    /// Text used for filtering and as the default display label.
    fn filter_value(&self) -> &str;

    /// Optional description shown below the label by the default delegate.
    fn description(&self) -> Option<&str> {
        None
    }
}

impl Item for String {
    fn filter_value(&self) -> &str {
        self
    }
}

impl Item for &'static str {
    fn filter_value(&self) -> &str {
        self
    }
}

impl<T: Item> Item for Arc<T> {
    fn filter_value(&self) -> &str {
        (**self).filter_value()
    }

    fn description(&self) -> Option<&str> {
        (**self).description()
    }
}

/// An item paired with the character positions the active filter matched.
///
/// `matches` holds char indices into [`Item::filter_value`], ascending and
/// without duplicates. It is empty for items that were not produced by a
/// ranking pass (for example when a filter starts with an empty query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredItem<I> {
    /// The matched item.
    pub item: I,
    /// Char indices of the matched characters.
    pub matches: Vec<usize>,
}

impl<I> FilteredItem<I> {
    /// Pair an item with no match annotations.
    pub fn unmatched(item: I) -> Self {
        Self {
            item,
            matches: Vec::new(),
        }
    }
}
