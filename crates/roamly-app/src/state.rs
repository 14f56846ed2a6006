//! Per-session UI state.
//!
//! One `SessionState` value per active user session, created at session
//! start and discarded at session end; handlers take it by `&mut` rather
//! than reaching for ambient globals. Only one interaction runs at a time,
//! so no locking is involved.

use std::collections::BTreeSet;

use crate::categories::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    page: usize,
    have_results: bool,
    preset_pending: bool,
    active_categories: BTreeSet<Category>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            page: 1,
            have_results: false,
            preset_pending: false,
            active_categories: BTreeSet::new(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current page, always >= 1.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Whether a search has been executed this session.
    pub fn have_results(&self) -> bool {
        self.have_results
    }

    /// Whether a weather preset is waiting for weather data to resolve.
    pub fn preset_pending(&self) -> bool {
        self.preset_pending
    }

    pub fn active_categories(&self) -> &BTreeSet<Category> {
        &self.active_categories
    }

    /// Direct category edit. Cancels any pending weather preset so a
    /// manual selection is never overwritten later.
    pub fn set_categories(&mut self, categories: BTreeSet<Category>) {
        self.active_categories = categories;
        self.preset_pending = false;
    }

    /// Toggle one category in or out; counts as a direct edit.
    pub fn toggle_category(&mut self, category: Category) {
        let mut categories = self.active_categories.clone();
        if !categories.remove(&category) {
            categories.insert(category);
        }
        self.set_categories(categories);
    }

    /// Ask for the weather preset. The selection is untouched until
    /// weather data for the current query resolves.
    pub fn request_preset(&mut self) {
        self.preset_pending = true;
    }

    /// Install the preset if one is still pending. Returns whether it
    /// applied, so the host can re-present the category widget.
    pub fn apply_preset_if_pending(&mut self, preset: BTreeSet<Category>) -> bool {
        if !self.preset_pending {
            return false;
        }
        self.active_categories = preset;
        self.preset_pending = false;
        true
    }

    /// A new search always starts back at page 1.
    pub fn begin_search(&mut self) {
        self.page = 1;
        self.have_results = true;
    }

    pub fn next_page(&mut self, max_page: usize) {
        self.page = (self.page + 1).min(max_page.max(1));
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Re-clamp after anything that can change the page count: page size,
    /// filters, or fresh data.
    pub fn clamp_page(&mut self, max_page: usize) {
        self.page = self.page.clamp(1, max_page.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SessionState::new();
        assert_eq!(state.page(), 1);
        assert!(!state.have_results());
        assert!(!state.preset_pending());
        assert!(state.active_categories().is_empty());
    }

    #[test]
    fn test_manual_edit_cancels_pending_preset() {
        let mut state = SessionState::new();
        state.request_preset();
        assert!(state.preset_pending());

        state.set_categories(BTreeSet::from([Category::Wine]));

        assert!(!state.preset_pending());
        assert_eq!(state.active_categories(), &BTreeSet::from([Category::Wine]));

        // A preset arriving after the cancellation must not be applied
        let applied = state.apply_preset_if_pending(BTreeSet::from([Category::Museums]));
        assert!(!applied);
        assert_eq!(state.active_categories(), &BTreeSet::from([Category::Wine]));
    }

    #[test]
    fn test_toggle_counts_as_edit() {
        let mut state = SessionState::new();
        state.request_preset();
        state.toggle_category(Category::Tours);

        assert!(!state.preset_pending());
        assert_eq!(state.active_categories(), &BTreeSet::from([Category::Tours]));

        state.toggle_category(Category::Tours);
        assert!(state.active_categories().is_empty());
    }

    #[test]
    fn test_pending_preset_applies_once() {
        let mut state = SessionState::new();
        state.request_preset();

        let preset = BTreeSet::from([Category::Wine, Category::Historical]);
        assert!(state.apply_preset_if_pending(preset.clone()));
        assert_eq!(state.active_categories(), &preset);
        assert!(!state.preset_pending());

        // The trigger fires at most once per refresh cycle
        assert!(!state.apply_preset_if_pending(BTreeSet::new()));
        assert_eq!(state.active_categories(), &preset);
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = SessionState::new();
        state.next_page(10);
        state.next_page(10);
        assert_eq!(state.page(), 3);

        state.begin_search();
        assert_eq!(state.page(), 1);
        assert!(state.have_results());
    }

    #[test]
    fn test_page_navigation_clamps_at_boundaries() {
        let mut state = SessionState::new();

        state.prev_page();
        assert_eq!(state.page(), 1);

        state.next_page(2);
        assert_eq!(state.page(), 2);
        state.next_page(2);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_clamp_page_after_shrinking_results() {
        let mut state = SessionState::new();
        state.next_page(5);
        state.next_page(5);
        state.next_page(5);
        assert_eq!(state.page(), 4);

        state.clamp_page(2);
        assert_eq!(state.page(), 2);

        state.clamp_page(0);
        assert_eq!(state.page(), 1);
    }
}
