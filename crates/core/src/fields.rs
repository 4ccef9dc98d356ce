//! Connection names and field selectors shared by fetch and normalization
//!
//! The normalizers in [`crate::normalize`] only see what the Graph API was asked
//! to return. These selectors are the contract between the two: a fetch that omits
//! them succeeds, and normalization of its result fails afterwards.

/// Root object for the authenticated user
pub const ME: &str = "me";

/// Pages the user can act on, each carrying its own access token
pub const ACCOUNTS: &str = "accounts";

/// Posts published by a page
pub const POSTS: &str = "posts";

/// Comments on a post, or replies on a comment
pub const COMMENTS: &str = "comments";

/// Fields required by [`crate::normalize::normalize_post`]
pub const POST_FIELDS: &str = "id,message,created_time,attachments{media,type,subattachments}";

/// Fields required by [`crate::normalize::normalize_comment`]
pub const COMMENT_FIELDS: &str = "id,from,message,created_time,like_count,parent";
