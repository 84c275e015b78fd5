//! Visible window of the available item sequence.
//!
//! The window is reconciled incrementally: it only scrolls when the selection
//! leaves it, and otherwise just grows or shrinks with capacity. Capacity can
//! change between renders (help toggled, status bar hidden), so the list
//! reconciles on every render pass, not only when the selection moves.

use tracing::trace;

/// Inputs to one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowParams {
    /// Total rows the list renders into.
    pub total_height: usize,
    /// Rows consumed by title, status bar and help.
    pub chrome_height: usize,
    /// Rows one item occupies.
    pub item_height: usize,
    /// Blank rows between items.
    pub spacing: usize,
    /// Selected index into the available sequence.
    pub selected: Option<usize>,
    /// Length of the available sequence.
    pub len: usize,
}

impl WindowParams {
    /// Number of items that fit, never less than one.
    pub fn capacity(&self) -> usize {
        let available = self.total_height.saturating_sub(self.chrome_height);
        let slot = (self.item_height + self.spacing).max(1);
        (available / slot).max(1)
    }
}

/// Inclusive bounds of the rendered slice of the available sequence.
///
/// Both bounds are `0` and carry no meaning when the sequence is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub first: usize,
    pub last: usize,
}

impl Window {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// Number of items inside the bounds.
    pub fn span(&self) -> usize {
        self.last.saturating_sub(self.first) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.first <= index && index <= self.last
    }

    /// Move the window so the selection stays visible.
    pub fn reconcile(&mut self, params: WindowParams) {
        let Some(selected) = params.selected.filter(|_| params.len > 0) else {
            *self = Window::default();
            return;
        };
        let capacity = params.capacity();
        let current_first = self.first;
        let current_last = params.len.min(current_first + capacity) - 1;

        if current_first <= selected && selected <= current_last {
            self.last = current_last;
        } else if selected > current_last {
            self.first = (selected + 1).saturating_sub(capacity);
            self.last = selected;
        } else {
            self.first = selected;
            self.last = selected + (params.len - selected).min(capacity) - 1;
        }
        trace!(
            first = self.first,
            last = self.last,
            selected,
            capacity,
            "viewport reconciled"
        );
    }
}
