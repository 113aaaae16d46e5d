//! # Query State Types
//!
//! What a list/search view needs to render: the current page of summaries,
//! where it sits in the result set, and whether a request is pending.

use crate::core::error::FrontendError;
use shared::ConcallSummary;

/// Whether the items come from the unfiltered listing or a name search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    #[default]
    Listing,
    Searching,
}

/// State owned by one [`PageQueryController`](super::query::PageQueryController).
///
/// `current_page` stays within `1..=total_pages`; `total_pages` is at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQueryState {
    pub items: Vec<ConcallSummary>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub mode: QueryMode,
    /// Term of the search in effect; empty while listing
    pub search_term: String,
    pub loading: bool,
    pub error: Option<FrontendError>,
}

impl Default for PageQueryState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_count: 0,
            mode: QueryMode::Listing,
            search_term: String::new(),
            loading: false,
            error: None,
        }
    }
}

impl PageQueryState {
    /// The term page changes should carry, `None` while listing.
    pub fn active_search_term(&self) -> Option<&str> {
        match self.mode {
            QueryMode::Searching if !self.search_term.is_empty() => Some(&self.search_term),
            _ => None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.mode == QueryMode::Searching
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn contains_page(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_first_page_of_listing() {
        let state = PageQueryState::default();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.mode, QueryMode::Listing);
        assert_eq!(state.active_search_term(), None);
        assert!(!state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn test_page_bounds() {
        let state = PageQueryState {
            current_page: 2,
            total_pages: 3,
            ..Default::default()
        };
        assert!(state.has_previous());
        assert!(state.has_next());
        assert!(state.contains_page(1));
        assert!(state.contains_page(3));
        assert!(!state.contains_page(0));
        assert!(!state.contains_page(4));
    }

    #[test]
    fn test_search_term_only_active_while_searching() {
        let mut state = PageQueryState {
            search_term: "Acme".to_string(),
            ..Default::default()
        };
        assert_eq!(state.active_search_term(), None);

        state.mode = QueryMode::Searching;
        assert_eq!(state.active_search_term(), Some("Acme"));
    }
}
