//! Selection movement over the visible node list.

/// Navigation over the node list with an optionally tracked node uuid.
///
/// Every move clears the tracked uuid so the next `resolve_selection()` goes
/// by position, and may leave `selected` out of range; clamping happens in
/// `resolve_selection()`.
pub trait NavigableNodes {
    fn selected(&self) -> usize;
    fn selected_mut(&mut self) -> &mut usize;
    fn clear_tracked(&mut self);

    /// Cards per row in grid layouts, 1 for lists and tables.
    fn columns(&self) -> usize {
        1
    }

    fn select_prev(&mut self) {
        *self.selected_mut() = self.selected().saturating_sub(1);
        self.clear_tracked();
    }

    fn select_next(&mut self) {
        *self.selected_mut() = self.selected().saturating_add(1);
        self.clear_tracked();
    }

    /// One grid row up (one item in single-column layouts).
    fn select_up(&mut self) {
        let step = self.columns().max(1);
        *self.selected_mut() = self.selected().saturating_sub(step);
        self.clear_tracked();
    }

    /// One grid row down. Stays put when there is no item below.
    fn select_down(&mut self, len: usize) {
        let step = self.columns().max(1);
        let target = self.selected().saturating_add(step);
        if target < len {
            *self.selected_mut() = target;
            self.clear_tracked();
        }
    }

    fn page_up(&mut self, rows: usize) {
        let step = rows.saturating_mul(self.columns().max(1));
        *self.selected_mut() = self.selected().saturating_sub(step);
        self.clear_tracked();
    }

    fn page_down(&mut self, rows: usize) {
        let step = rows.saturating_mul(self.columns().max(1));
        *self.selected_mut() = self.selected().saturating_add(step);
        self.clear_tracked();
    }

    fn home(&mut self) {
        *self.selected_mut() = 0;
        self.clear_tracked();
    }

    fn end(&mut self) {
        *self.selected_mut() = usize::MAX;
        self.clear_tracked();
    }
}
