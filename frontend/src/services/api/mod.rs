//! # Backend API Client Module
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports
//! ├── client.rs     - ApiClient, shared request/response handling
//! ├── concalls.rs   - Listing and search endpoints
//! ├── analytics.rs  - Analytics snapshot endpoint
//! └── websocket.rs  - Analytics WebSocket connector and frame decoding
//! ```

pub mod analytics;
pub mod client;
pub mod concalls;
pub mod websocket;

pub use client::ApiClient;
pub use websocket::{decode_frame, FrameDecode, WsConnector};
