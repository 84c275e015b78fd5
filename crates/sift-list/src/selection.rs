//! Selected index into the available item sequence.
//!
//! `Selection` never wraps and never fails: every move is clamped into the
//! current length, and an empty sequence always means no selection.

/// The single selected position, or `None` when nothing can be selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
}

impl Selection {
    /// Select the first item when `len > 0`.
    pub fn new(len: usize) -> Self {
        Self {
            index: (len > 0).then_some(0),
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Select `index`, clamped into `[0, len - 1]`.
    pub fn select(&mut self, index: usize, len: usize) {
        self.index = match len {
            0 => None,
            _ => Some(index.min(len - 1)),
        };
    }

    pub fn cursor_up(&mut self, len: usize) {
        let current = self.index.unwrap_or(0);
        self.select(current.saturating_sub(1), len);
    }

    pub fn cursor_down(&mut self, len: usize) {
        let next = self.index.map_or(0, |i| i.saturating_add(1));
        self.select(next, len);
    }

    /// Select the first item.
    pub fn reset(&mut self, len: usize) {
        self.select(0, len);
    }

    pub fn select_last(&mut self, len: usize) {
        self.select(len.saturating_sub(1), len);
    }

    pub fn page_up(&mut self, page: usize, len: usize) {
        let current = self.index.unwrap_or(0);
        self.select(current.saturating_sub(page.max(1)), len);
    }

    pub fn page_down(&mut self, page: usize, len: usize) {
        let current = self.index.unwrap_or(0);
        self.select(current.saturating_add(page.max(1)), len);
    }

    /// Re-clamp after the underlying sequence changed length.
    ///
    /// A sequence that becomes non-empty while nothing was selected selects
    /// its first item.
    pub fn clamp(&mut self, len: usize) {
        self.select(self.index.unwrap_or(0), len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selects_first_when_non_empty() {
        assert_eq!(Selection::new(3).index(), Some(0));
        assert_eq!(Selection::new(0).index(), None);
    }

    #[test]
    fn select_clamps_high() {
        let mut s = Selection::new(5);
        s.select(100, 5);
        assert_eq!(s.index(), Some(4));
    }

    #[test]
    fn select_on_empty_is_none() {
        let mut s = Selection::new(5);
        s.select(2, 0);
        assert_eq!(s.index(), None);
    }

    #[test]
    fn cursor_does_not_wrap() {
        let mut s = Selection::new(3);
        s.cursor_up(3);
        assert_eq!(s.index(), Some(0));
        s.cursor_down(3);
        s.cursor_down(3);
        s.cursor_down(3);
        assert_eq!(s.index(), Some(2));
    }

    #[test]
    fn reset_and_last() {
        let mut s = Selection::new(10);
        s.select_last(10);
        assert_eq!(s.index(), Some(9));
        s.reset(10);
        assert_eq!(s.index(), Some(0));
    }

    #[test]
    fn paging_clamps() {
        let mut s = Selection::new(20);
        s.page_down(5, 20);
        assert_eq!(s.index(), Some(5));
        s.select(18, 20);
        s.page_down(5, 20);
        assert_eq!(s.index(), Some(19));
        s.select(2, 20);
        s.page_up(5, 20);
        assert_eq!(s.index(), Some(0));
    }

    #[test]
    fn clamp_after_shrink_and_regrow() {
        let mut s = Selection::new(10);
        s.select(8, 10);
        s.clamp(5);
        assert_eq!(s.index(), Some(4));
        s.clamp(0);
        assert_eq!(s.index(), None);
        s.clamp(3);
        assert_eq!(s.index(), Some(0));
    }
}
