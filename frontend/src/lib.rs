//! # Concall Front-end - Library Root
//!
//! Client for browsing earnings-call ("concall") summaries with a live
//! analytics dashboard. This library crate contains all modules used by the
//! binary crate (`main.rs`).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              frontend (this crate)                     │
//! ├────────────────────────────────────────────────────────┤
//! │  ui        - Text views (list, search bar, analytics)  │
//! │  app       - AnalyticsStore, PageQueryController       │
//! │  services  - ApiClient (reqwest), WsConnector          │
//! │  core      - Config, errors, service traits            │
//! │  debug     - tracing setup                             │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP                         │ WebSocket
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │ /list_concalls  │          │   /ws/analytics         │
//! │ /find_concalls  │          │   analytics_update      │
//! │ /analytics      │          │   frames                │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Core Concepts
//!
//! ### One analytics store per process
//!
//! [`app::AnalyticsStore`] is created once by [`app::App`]. Views subscribe
//! to it; the first subscriber triggers the only fetch, later ones are served
//! from memory, and the WebSocket keeps everybody current.
//!
//! ### One query controller per list view
//!
//! [`app::PageQueryController`] owns page, mode and search term for a single
//! view and discards responses to requests that have been superseded.
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p concall-frontend
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod services;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{AnalyticsStore, App, PageQueryController};
pub use core::{FrontendError, Result};
