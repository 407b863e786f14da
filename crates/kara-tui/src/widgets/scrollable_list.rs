//! Generic scrollable list widget — selection, viewport, and click handling.
//!
//! Items are replaced wholesale (on browse or search); there is no
//! incremental filtering at this level.

pub struct ScrollableList<T> {
    pub items: Vec<T>,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl<T> ScrollableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
        }
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.items.len() - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Returns (index, &item) pairs visible in `height` rows.
    /// Call ensure_visible first to update scroll_offset.
    pub fn visible_items(&self, height: usize) -> Vec<(usize, &T)> {
        if height == 0 || self.items.is_empty() {
            return Vec::new();
        }
        let end = (self.scroll_offset + height).min(self.items.len());
        self.items[self.scroll_offset..end]
            .iter()
            .enumerate()
            .map(|(i, item)| (self.scroll_offset + i, item))
            .collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }

    /// Handle a click at `row` within the rendered area.
    /// Returns true if selection changed.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.items.len() {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_in_view(&self, height: usize) -> usize {
        self.selected
            .saturating_sub(self.scroll_offset)
            .min(height.saturating_sub(1))
    }
}

impl<T> Default for ScrollableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> ScrollableList<usize> {
        let mut list = ScrollableList::new();
        list.set_items((0..n).collect());
        list
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut list = list_of(3);
        list.select_up(5);
        assert_eq!(list.selected, 0);
        list.select_down(10);
        assert_eq!(list.selected, 2);
    }

    #[test]
    fn viewport_follows_selection() {
        let mut list = list_of(20);
        list.selected = 12;
        list.ensure_visible(5);
        assert_eq!(list.scroll_offset, 8);
        let visible: Vec<usize> = list.visible_items(5).iter().map(|(i, _)| *i).collect();
        assert_eq!(visible, vec![8, 9, 10, 11, 12]);
        assert_eq!(list.selected_in_view(5), 4);
    }

    #[test]
    fn click_outside_items_is_ignored() {
        let mut list = list_of(2);
        assert!(list.handle_click(1));
        assert_eq!(list.selected, 1);
        assert!(!list.handle_click(7));
        assert_eq!(list.selected, 1);
    }

    #[test]
    fn set_items_resets_cursor() {
        let mut list = list_of(10);
        list.selected = 7;
        list.scroll_offset = 4;
        list.set_items(vec![1, 2]);
        assert_eq!(list.selected, 0);
        assert_eq!(list.scroll_offset, 0);
    }
}
