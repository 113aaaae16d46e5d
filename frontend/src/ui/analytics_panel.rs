//! Analytics dashboard view.
//!
//! Mounting subscribes to the [`AnalyticsStore`]; dropping (or
//! [`unmount`](AnalyticsView::unmount)) unsubscribes. Once any snapshot has
//! arrived the panel keeps showing data, even if a later refresh fails.

use crate::app::analytics_store::{AnalyticsStore, Subscription};
use crate::app::events::AnalyticsUpdate;
use crate::core::error::FrontendError;
use crate::ui::format::format_count;
use shared::AnalyticsSnapshot;

pub const LOADING_TEXT: &str = "Loading analytics...";

/// What the panel shows right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsPanel {
    Loading,
    Error(String),
    Dashboard {
        unique_users: String,
        total_visits: String,
    },
}

pub struct AnalyticsView {
    subscription: Subscription,
    snapshot: Option<AnalyticsSnapshot>,
    error: Option<FrontendError>,
}

impl AnalyticsView {
    pub fn mount(store: &AnalyticsStore) -> Self {
        let mut view = Self {
            subscription: store.subscribe(),
            snapshot: None,
            error: None,
        };
        // Resident data is already queued
        view.poll();
        view
    }

    pub fn apply(&mut self, update: AnalyticsUpdate) {
        match update {
            AnalyticsUpdate::Data(snapshot) => {
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            AnalyticsUpdate::Error(error) => self.error = Some(error),
        }
    }

    /// Apply every queued update. Returns `true` if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(update) = self.subscription.try_recv() {
            self.apply(update);
            changed = true;
        }
        changed
    }

    /// Wait for the next update and apply it. `false` once the store is gone.
    pub async fn next_update(&mut self) -> bool {
        match self.subscription.recv().await {
            Some(update) => {
                self.apply(update);
                true
            }
            None => false,
        }
    }

    pub fn panel(&self) -> AnalyticsPanel {
        match (&self.snapshot, &self.error) {
            (Some(snapshot), _) => AnalyticsPanel::Dashboard {
                unique_users: format_count(snapshot.unique_users.unwrap_or(0)),
                total_visits: format_count(snapshot.total_visits),
            },
            (None, Some(error)) => AnalyticsPanel::Error(error.to_string()),
            (None, None) => AnalyticsPanel::Loading,
        }
    }

    pub fn render(&self) -> String {
        match self.panel() {
            AnalyticsPanel::Loading => format!("{LOADING_TEXT}\n"),
            AnalyticsPanel::Error(message) => format!("⚠️ {message}\n"),
            AnalyticsPanel::Dashboard {
                unique_users,
                total_visits,
            } => format!("Unique Users: {unique_users}\nTotal Visits: {total_visits}\n"),
        }
    }

    pub fn unmount(self) {
        self.subscription.unsubscribe();
    }
}
