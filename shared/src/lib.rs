//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the concall front-end and the
//! backend API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::concall`]**: Concall summaries and paginated listing envelopes
//!   - **[`dto::analytics`]**: Analytics snapshots and streamed update frames
//! - **[`utils`]**: Shared pagination helpers
//!
//! ## Wire Format
//!
//! - Concall and analytics fields are **snake_case** in JSON
//! - Pagination metadata uses the backend's `totalPages` spelling
//! - Error bodies are `{ "error": "..." }`
//!
//! ## Usage in Frontend
//!
//! ```rust
//! use shared::dto::concall::ConcallPage;
//!
//! let body = r#"{"data":[{"name":"Acme Ltd","date":"2025-08-14","guidance":"NA"}],
//!               "meta":{"page":1,"total":25,"totalPages":3}}"#;
//! let page: ConcallPage = serde_json::from_str(body).unwrap();
//! assert_eq!(page.meta.total_pages, 3);
//! assert!(!page.data[0].has_guidance());
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library, everything here is public API
pub use dto::*;
pub use utils::*;
