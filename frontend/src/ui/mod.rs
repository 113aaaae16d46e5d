//! # Text Views
//!
//! Plain-text view-models for the concall browser. Each view derives what it
//! shows from controller state; none of them talks to the network.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Cipher                                      │
//! │ Real-time guidance derived from every ...   │
//! ├─────────────────────────────────────────────┤
//! │ search_bar      SearchBar                   │
//! │ concall_list    ConcallListView             │
//! │ analytics_panel AnalyticsView               │
//! └─────────────────────────────────────────────┘
//! ```

pub mod analytics_panel;
pub mod concall_list;
pub mod format;
pub mod search_bar;

pub use analytics_panel::{AnalyticsPanel, AnalyticsView};
pub use concall_list::{ConcallCard, ConcallListView, ListBody, Pagination};
pub use search_bar::{SearchAction, SearchBar};

use crate::app::state::PageQueryState;

pub const TITLE: &str = "Cipher";
pub const SUBTITLE: &str = "Real-time guidance derived from every concall";

/// Render the whole page: header, search bar, list, pagination, analytics.
pub fn render_page(search: &SearchBar, state: &PageQueryState, analytics: &AnalyticsView) -> String {
    let mut out = format!("{TITLE}\n{SUBTITLE}\n\n");
    out.push_str(&search.render(state));
    out.push('\n');
    out.push_str(&ConcallListView::from_state(state).render());
    out.push('\n');
    out.push_str(&analytics.render());
    out
}
