//! # Services Module
//!
//! External integrations of the concall front-end.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 frontend                     │
//! │                                              │
//! │  ┌──────────────────┐  ┌──────────────────┐  │
//! │  │  ApiClient       │  │  WsConnector     │  │
//! │  │  (REST)          │  │  (WebSocket)     │  │
//! │  └────────┬─────────┘  └────────┬─────────┘  │
//! └───────────┼─────────────────────┼────────────┘
//!             │ HTTP/JSON           │ ws(s)://…/ws/analytics
//!             ▼                     ▼
//! ┌──────────────────────────────────────────────┐
//! │  Concall backend                             │
//! │  /api/list_concalls  /api/find_concalls      │
//! │  /api/analytics      /ws/analytics           │
//! └──────────────────────────────────────────────┘
//! ```

pub mod api;
