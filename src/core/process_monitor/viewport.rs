//! Selection and scroll state for the process table.

use std::ops::Range;

/// Selected row and first visible row of the process table.
///
/// For a non-empty list the state always satisfies
/// `scroll_offset <= selected_index < scroll_offset + page_size`
/// (with a page of at least one row), and `selected_index < len`.
/// For an empty list both indices are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub page_size: usize,
}

impl ViewportState {
    pub fn new(page_size: usize) -> Self {
        Self {
            selected_index: 0,
            scroll_offset: 0,
            page_size,
        }
    }

    /// Re-clamp after a new list of `len` rows was produced
    pub fn on_refresh(&mut self, len: usize, page_size: usize) {
        self.page_size = page_size;
        if len == 0 {
            self.reset();
            return;
        }
        self.selected_index = self.selected_index.min(len - 1);
        self.follow_selection();
    }

    /// Move the selection by `delta` rows, clamped to the list
    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        let last = (len - 1) as isize;
        let target = (self.selected_index as isize).saturating_add(delta);
        self.selected_index = target.clamp(0, last) as usize;
        self.follow_selection();
    }

    pub fn page_down(&mut self, len: usize) {
        self.move_by(self.step(), len);
    }

    pub fn page_up(&mut self, len: usize) {
        self.move_by(-self.step(), len);
    }

    pub fn home(&mut self, len: usize) {
        self.move_by(isize::MIN, len);
    }

    pub fn end(&mut self, len: usize) {
        self.move_by(isize::MAX, len);
    }

    /// Back to the top of the list
    pub fn reset(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Rows of a `len`-row list currently on screen
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.scroll_offset.min(len);
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }

    pub fn visible_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.visible_range(items.len())]
    }

    pub fn selected<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.selected_index)
    }

    /// Position of the selection inside the visible page, if it is on screen
    pub fn selected_row_on_page(&self, len: usize) -> Option<usize> {
        self.visible_range(len)
            .contains(&self.selected_index)
            .then(|| self.selected_index - self.scroll_offset)
    }

    fn step(&self) -> isize {
        self.page_size.max(1) as isize
    }

    fn follow_selection(&mut self) {
        let page = self.page_size.max(1);
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + page {
            self.scroll_offset = self.selected_index + 1 - page;
        }
    }
}
