//! Core library for fbgraph
//!
//! This crate implements the **Functional Core** of the fbgraph client, following
//! the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`fbgraph_core`** (this crate): Pure transformation functions with zero I/O
//! - **`fbgraph`**: HTTP transport, the cursor-following loop, and the client facade
//!
//! Everything here is deterministic: the same raw JSON always normalizes to the same
//! record or the same error, so it can be tested with fixture data and no mocking.
//!
//! # Module Organization
//!
//! - [`models`]: the normalized records ([`models::Account`], [`models::Post`], [`models::Comment`])
//! - [`normalize`]: per-entity adapters from raw JSON to records
//! - [`pagination`]: page splitting, cursor extraction and traversal guards
//! - [`fields`]: connection names and the field selectors the adapters rely on
//!
//! # Example Usage
//!
//! ```rust
//! use fbgraph_core::normalize::normalize_comment;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "id": "1",
//!     "message": "hi",
//!     "created_time": "2024-01-01T00:00:00+0000",
//!     "from": {"id": "9", "name": "A"}
//! });
//!
//! let comment = normalize_comment(&raw).unwrap();
//! assert_eq!(comment.like_count, 0);
//! assert_eq!(comment.parent_id, None);
//! ```

pub mod fields;
pub mod models;
pub mod normalize;
pub mod pagination;

pub use models::{Account, Attachments, Author, Comment, Image, Post};
pub use normalize::NormalizeError;
