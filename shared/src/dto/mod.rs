//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the concall backend over REST and the
//! analytics WebSocket.
//!
//! ## Module Organization
//!
//! - [`concall`] - Concall summaries, pagination metadata, listing envelopes
//! - [`analytics`] - Analytics snapshot and the `analytics_update` frame
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /api/list_concalls?page=1&limit=12
//!
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "data": [
//!     { "name": "Acme Ltd", "date": "2025-08-14", "guidance": "Revenue growth of 15-18%" }
//!   ],
//!   "meta": { "page": 1, "limit": 12, "total": 25, "totalPages": 3 }
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 500 Internal Server Error
//!
//! { "error": "Failed to fetch concalls" }
//! ```

pub mod analytics;
pub mod concall;

pub use analytics::*;
pub use concall::*;

use serde::{Deserialize, Serialize};

/// Error response body returned by the backend on non-2xx status codes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
