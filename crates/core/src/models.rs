//! Normalized Graph API records
//!
//! These are the strict shapes the rest of the crate works with. They are built by
//! the adapters in [`crate::normalize`] and never hold references to each other:
//! a [`Post`] does not carry its [`Comment`]s, callers correlate them by ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Accounts
// =============================================================================

/// A page the authenticated user can act on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Page access token, used for every post and comment operation on this page
    pub access_token: String,
    pub id: String,
    pub name: String,
    /// Roles the current user holds on this page (e.g. "MODERATE", "CREATE_CONTENT")
    pub tasks: Vec<String>,
}

// =============================================================================
// Posts
// =============================================================================

/// A single photo attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Direct URL to the image on Facebook's CDN
    pub src: String,
    pub width: u64,
    pub height: u64,
}

/// Normalized attachments of a post
///
/// Only ever constructed with at least one image; a post without photos has
/// `attachments: None` instead of an empty container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachments {
    pub images: Vec<Image>,
}

/// A page post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub created_time: DateTime<Utc>,
    pub message: Option<String>,
    pub attachments: Option<Attachments>,
}

// =============================================================================
// Comments
// =============================================================================

/// Who wrote a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

/// A comment on a post, or a reply to another comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub message: String,
    pub created_time: DateTime<Utc>,
    #[serde(rename = "from")]
    pub author: Author,
    pub like_count: u64,
    /// Set only for replies
    pub parent_id: Option<String>,
}

impl Comment {
    /// Whether this comment is a reply to another comment
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}
