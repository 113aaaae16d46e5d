//! # Paginated Query Controller
//!
//! Drives one list/search view: which page is shown, whether a name filter is
//! active, and which remote call answers the current request.
//!
//! Every load takes a fresh generation number. A response whose generation
//! is no longer the newest is discarded, so a slow older request can never
//! overwrite the answer to a newer one. The `loading` flag belongs to the
//! newest request and is cleared by a guard that runs however the load ends.

use crate::app::state::{PageQueryState, QueryMode};
use crate::core::service::ConcallGateway;
use parking_lot::RwLock;
use shared::{normalize_search_term, total_pages_for};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Requested page movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// Relative to the current page (`-1` previous, `1` next)
    Delta(i64),
    /// A specific page number
    Absolute(u32),
}

/// How a load ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    /// A newer load started before this one finished; its result was dropped
    Superseded,
}

pub struct PageQueryController {
    gateway: Arc<dyn ConcallGateway>,
    limit: u32,
    state: RwLock<PageQueryState>,
    generation: AtomicU64,
}

/// Clears `loading` on drop, unless a newer load owns it by then.
struct LoadingGuard<'a> {
    controller: &'a PageQueryController,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.controller.is_current(self.generation) {
            self.controller.state.write().loading = false;
        }
    }
}

impl PageQueryController {
    pub fn new(gateway: Arc<dyn ConcallGateway>, limit: u32) -> Self {
        Self {
            gateway,
            limit: limit.max(1),
            state: RwLock::new(PageQueryState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Copy of the current state for rendering
    pub fn state(&self) -> PageQueryState {
        self.state.read().clone()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Load `page`, searching by `search_term` unless it is blank.
    ///
    /// On success the items, page position and mode are replaced. On failure
    /// the error is recorded and the items cleared; the mode is left as it was.
    #[tracing::instrument(skip(self))]
    pub async fn load_page(&self, page: u32, search_term: &str) -> LoadOutcome {
        let page = page.max(1);
        let term = normalize_search_term(search_term);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        let _loading = LoadingGuard {
            controller: self,
            generation,
        };

        let result = match term {
            Some(name) => self.gateway.search_page(name, page, self.limit).await,
            None => self.gateway.list_page(page, self.limit).await,
        };

        if !self.is_current(generation) {
            debug!(generation, "Discarding superseded page response");
            return LoadOutcome::Superseded;
        }

        let mut state = self.state.write();
        match result {
            Ok(response) => {
                let total_pages = if response.meta.total_pages > 0 {
                    response.meta.total_pages
                } else {
                    total_pages_for(response.meta.total, self.limit)
                };
                let current_page = match response.meta.page {
                    0 => page,
                    served => served,
                };

                debug!(
                    items = response.data.len(),
                    total = response.meta.total,
                    total_pages,
                    "Page loaded"
                );
                state.items = response.data;
                state.total_pages = total_pages;
                state.total_count = response.meta.total;
                state.current_page = current_page.clamp(1, total_pages);
                state.mode = if term.is_some() {
                    QueryMode::Searching
                } else {
                    QueryMode::Listing
                };
                state.search_term = term.unwrap_or_default().to_string();
                LoadOutcome::Loaded
            }
            Err(error) => {
                warn!(error = %error, "Failed to load page");
                state.error = Some(error);
                state.items.clear();
                LoadOutcome::Failed
            }
        }
    }

    /// Move to another page, keeping any active search.
    ///
    /// Returns `None` without touching anything when the target lies outside
    /// `1..=total_pages`.
    pub async fn change_page(&self, change: PageChange) -> Option<LoadOutcome> {
        let (target, term) = {
            let state = self.state.read();
            let target = match change {
                PageChange::Delta(delta) => i64::from(state.current_page).saturating_add(delta),
                PageChange::Absolute(page) => i64::from(page),
            };
            let target = u32::try_from(target).ok().filter(|p| state.contains_page(*p));
            let Some(target) = target else {
                debug!(?change, total_pages = state.total_pages, "Ignoring out-of-range page change");
                return None;
            };
            (target, state.active_search_term().unwrap_or_default().to_string())
        };

        Some(self.load_page(target, &term).await)
    }

    /// Search by name from page 1. A blank term clears the search instead.
    pub async fn search(&self, term: &str) -> LoadOutcome {
        match normalize_search_term(term) {
            Some(term) => self.load_page(1, term).await,
            None => self.clear_search().await,
        }
    }

    /// Back to the unfiltered listing, page 1.
    pub async fn clear_search(&self) -> LoadOutcome {
        {
            let mut state = self.state.write();
            state.search_term.clear();
            state.mode = QueryMode::Listing;
        }
        self.load_page(1, "").await
    }

    /// Load the current page again with the current mode.
    pub async fn reload(&self) -> LoadOutcome {
        let (page, term) = {
            let state = self.state.read();
            (
                state.current_page,
                state.active_search_term().unwrap_or_default().to_string(),
            )
        };
        self.load_page(page, &term).await
    }
}
