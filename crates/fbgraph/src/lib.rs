//! Typed client for the Facebook Graph API
//!
//! This crate is the imperative shell around [`fbgraph_core`]: it owns the HTTP
//! transport, follows pagination cursors, and exposes the page/post/comment
//! operations. All JSON-to-record mapping lives in the core crate.
//!
//! ```rust,no_run
//! # async fn example() -> fbgraph::Result<()> {
//! let client = fbgraph::Client::from_env()?;
//!
//! for account in client.get_accounts().await? {
//!     for post in client.get_posts(&account).await? {
//!         let comments = client.get_comments(&account, &post).await?;
//!         println!("{}: {} comments", post.id, comments.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A synchronous client with the same operations is available as [`blocking::Client`].

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod graph;
pub mod paginator;
mod prelude;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use config::GraphConfig;
pub use error::{Error, Result};
pub use fbgraph_core::models::{Account, Attachments, Author, Comment, Image, Post};
pub use fbgraph_core::NormalizeError;
pub use graph::{GraphApi, HttpGraphApi, Params};
pub use paginator::Paginator;
