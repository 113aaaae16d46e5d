//! Concall list view: cards, empty state, error banner and pagination,
//! all derived from a [`PageQueryState`].

use crate::app::state::PageQueryState;
use crate::ui::format::plural;
use shared::{ConcallSummary, Guidance};
use std::fmt::Write as _;

pub const LOADING_TEXT: &str = "Loading concalls...";
pub const NO_GUIDANCE_TEXT: &str = "No guidance provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcallCard {
    pub name: String,
    pub date: String,
    /// Display text; the "no guidance" sentinel is already replaced
    pub guidance: String,
    pub has_guidance: bool,
}

impl From<&ConcallSummary> for ConcallCard {
    fn from(summary: &ConcallSummary) -> Self {
        let (guidance, has_guidance) = match summary.guidance() {
            Guidance::Provided(text) => (text.to_string(), true),
            Guidance::NotProvided => (NO_GUIDANCE_TEXT.to_string(), false),
        };
        Self {
            name: summary.name.clone(),
            date: summary.date.clone(),
            guidance,
            has_guidance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Loading,
    Empty { message: String },
    Cards(Vec<ConcallCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// "Page 2 of 3 (25 total)"
    pub label: String,
    pub can_previous: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcallListView {
    pub error: Option<String>,
    /// "Found 3 results for "Acme"", search mode only
    pub results_header: Option<String>,
    pub body: ListBody,
    /// Hidden while loading or when there is nothing to page through
    pub pagination: Option<Pagination>,
}

impl ConcallListView {
    pub fn from_state(state: &PageQueryState) -> Self {
        let error = state.error.as_ref().map(|e| e.to_string());

        if state.loading {
            return Self {
                error,
                results_header: None,
                body: ListBody::Loading,
                pagination: None,
            };
        }

        if state.items.is_empty() {
            let message = match state.active_search_term() {
                Some(term) => format!("No results found for \"{term}\""),
                None => "No concalls available at the moment".to_string(),
            };
            return Self {
                error,
                results_header: None,
                body: ListBody::Empty { message },
                pagination: None,
            };
        }

        let results_header = state.active_search_term().map(|term| {
            format!("Found {} for \"{term}\"", plural(state.total_count, "result"))
        });

        Self {
            error,
            results_header,
            body: ListBody::Cards(state.items.iter().map(ConcallCard::from).collect()),
            pagination: Some(Pagination {
                label: format!(
                    "Page {} of {} ({} total)",
                    state.current_page, state.total_pages, state.total_count
                ),
                can_previous: state.has_previous(),
                can_next: state.has_next(),
            }),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(error) = &self.error {
            let _ = writeln!(out, "⚠️ {error}");
        }

        match &self.body {
            ListBody::Loading => {
                let _ = writeln!(out, "{LOADING_TEXT}");
            }
            ListBody::Empty { message } => {
                let _ = writeln!(out, "No concalls found");
                let _ = writeln!(out, "{message}");
            }
            ListBody::Cards(cards) => {
                if let Some(header) = &self.results_header {
                    let _ = writeln!(out, "{header}");
                }
                for card in cards {
                    let _ = writeln!(out, "{} [{}]", card.name, card.date);
                    let _ = writeln!(out, "  FY26 Guidance: {}", card.guidance);
                }
            }
        }

        if let Some(pagination) = &self.pagination {
            let previous = if pagination.can_previous { "← Previous" } else { "  ········" };
            let next = if pagination.can_next { "Next →" } else { "······" };
            let _ = writeln!(out, "{}   {previous} | {next}", pagination.label);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::QueryMode;
    use crate::core::error::FrontendError;

    fn summary(name: &str, guidance: &str) -> ConcallSummary {
        ConcallSummary {
            name: name.to_string(),
            date: "2024-05-14".to_string(),
            guidance: guidance.to_string(),
        }
    }

    fn searching(term: &str) -> PageQueryState {
        PageQueryState {
            mode: QueryMode::Searching,
            search_term: term.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_search_message() {
        let view = ConcallListView::from_state(&searching("Acme"));
        assert_eq!(
            view.body,
            ListBody::Empty {
                message: "No results found for \"Acme\"".to_string()
            }
        );
        assert!(view.pagination.is_none());
        assert!(view.render().contains("No results found for \"Acme\""));
    }

    #[test]
    fn test_empty_listing_message() {
        let view = ConcallListView::from_state(&PageQueryState::default());
        assert_eq!(
            view.body,
            ListBody::Empty {
                message: "No concalls available at the moment".to_string()
            }
        );
    }

    #[test]
    fn test_loading_hides_cards_and_pagination() {
        let state = PageQueryState {
            loading: true,
            items: vec![summary("Acme", "NA")],
            ..Default::default()
        };
        let view = ConcallListView::from_state(&state);
        assert_eq!(view.body, ListBody::Loading);
        assert!(view.pagination.is_none());
    }

    #[test]
    fn test_cards_with_pagination_and_header() {
        let state = PageQueryState {
            items: vec![summary("Acme Corp", "Margin expansion of 200bps"), summary("Acme Labs", "NA")],
            current_page: 1,
            total_pages: 3,
            total_count: 25,
            ..searching("Acme")
        };
        let view = ConcallListView::from_state(&state);

        assert_eq!(view.results_header.as_deref(), Some("Found 25 results for \"Acme\""));
        let ListBody::Cards(cards) = &view.body else {
            panic!("expected cards, got {:?}", view.body);
        };
        assert!(cards[0].has_guidance);
        assert_eq!(cards[1].guidance, NO_GUIDANCE_TEXT);
        assert!(!cards[1].has_guidance);

        let pagination = view.pagination.unwrap();
        assert_eq!(pagination.label, "Page 1 of 3 (25 total)");
        assert!(!pagination.can_previous);
        assert!(pagination.can_next);
    }

    #[test]
    fn test_empty_guidance_is_not_the_sentinel() {
        let card = ConcallCard::from(&summary("Acme", ""));
        assert!(card.has_guidance);
        assert_eq!(card.guidance, "");
    }

    #[test]
    fn test_error_banner_with_empty_list() {
        let state = PageQueryState {
            error: Some(FrontendError::http(500, "Failed to fetch concalls")),
            ..Default::default()
        };
        let view = ConcallListView::from_state(&state);
        assert_eq!(view.error.as_deref(), Some("Failed to fetch concalls"));
        assert!(view.render().starts_with("⚠️ Failed to fetch concalls"));
    }

    #[test]
    fn test_single_result_header() {
        let state = PageQueryState {
            items: vec![summary("Acme", "NA")],
            total_count: 1,
            ..searching("Acme")
        };
        let view = ConcallListView::from_state(&state);
        assert_eq!(view.results_header.as_deref(), Some("Found 1 result for \"Acme\""));
    }
}
