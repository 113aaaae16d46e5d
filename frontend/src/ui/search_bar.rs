//! Search input: turns what the user typed into controller calls.

use crate::app::query::{LoadOutcome, PageQueryController};
use crate::app::state::PageQueryState;
use shared::normalize_search_term;

pub const PLACEHOLDER: &str = "Search by company name...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Search(String),
    Clear,
}

impl SearchAction {
    pub async fn dispatch(self, controller: &PageQueryController) -> LoadOutcome {
        match self {
            SearchAction::Search(term) => controller.search(&term).await,
            SearchAction::Clear => controller.clear_search().await,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchBar {
    input: String,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Submitting blank input does nothing.
    pub fn submit(&self) -> Option<SearchAction> {
        normalize_search_term(&self.input).map(|term| SearchAction::Search(term.to_string()))
    }

    pub fn clear(&mut self) -> SearchAction {
        self.input.clear();
        SearchAction::Clear
    }

    /// The clear button only exists while a search is active
    pub fn shows_clear_button(state: &PageQueryState) -> bool {
        state.is_searching()
    }

    pub fn status_line(state: &PageQueryState) -> Option<String> {
        state
            .active_search_term()
            .map(|term| format!("Showing results for: {term}"))
    }

    pub fn render(&self, state: &PageQueryState) -> String {
        let input = if self.input.is_empty() {
            PLACEHOLDER
        } else {
            self.input.as_str()
        };
        let clear = if Self::shows_clear_button(state) { " [✕]" } else { "" };

        let mut out = format!("🔍 {input}{clear} [Search]\n");
        if let Some(status) = Self::status_line(state) {
            out.push_str(&status);
            out.push('\n');
        }
        out
    }
}
