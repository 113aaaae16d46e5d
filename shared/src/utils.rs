//! # Shared Utility Functions
//!
//! Pagination and search-term helpers used by the front-end and mirrored by
//! the backend's own paging arithmetic.
//!
//! ```rust
//! use shared::utils::{normalize_search_term, total_pages_for};
//!
//! assert_eq!(total_pages_for(25, 12), 3);
//! assert_eq!(normalize_search_term("  Acme "), Some("Acme"));
//! assert_eq!(normalize_search_term("   "), None);
//! ```

/// Page size used when the caller does not configure one
pub const DEFAULT_PAGE_LIMIT: u32 = 12;

/// Number of pages needed to show `total` items at `limit` per page.
///
/// Never returns less than 1, so an empty result set is still "page 1 of 1".
pub fn total_pages_for(total: u64, limit: u32) -> u32 {
    if limit == 0 || total == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// Trim a search term; blank terms (including whitespace-only) become `None`.
pub fn normalize_search_term(term: &str) -> Option<&str> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
