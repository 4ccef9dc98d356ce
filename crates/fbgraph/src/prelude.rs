pub use crate::error::{Error, Result};
pub use fbgraph_core::models::{Account, Comment, Post};
pub use serde_json::Value;
pub use std::format as f;
