//! Synchronous variant of [`crate::Client`]
//!
//! Each method drives the async client to completion on a private current-thread
//! runtime, so ordering and semantics match the async API call for call.
//!
//! Do not use this client from inside an async runtime: blocking on a runtime from
//! within another one panics.

use crate::config::GraphConfig;
use crate::graph::{GraphApi, HttpGraphApi};
use crate::prelude::*;

/// Blocking client for managing Facebook pages, posts and comments
#[derive(Debug)]
pub struct Client<G = HttpGraphApi> {
    inner: crate::Client<G>,
    runtime: tokio::runtime::Runtime,
}

impl Client<HttpGraphApi> {
    /// Create a client against the public Graph API with default settings
    pub fn new(user_access_token: impl Into<String>) -> Result<Self> {
        Self::from_config(GraphConfig::new(user_access_token))
    }

    /// Create a client from an explicit configuration
    pub fn from_config(config: GraphConfig) -> Result<Self> {
        Self::from_async(crate::Client::from_config(config)?)
    }

    /// Create a client from `FACEBOOK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(GraphConfig::from_env()?)
    }
}

impl<G: GraphApi> Client<G> {
    /// Create a client over any [`GraphApi`] implementation
    pub fn with_graph(graph: G, user_access_token: impl Into<String>) -> Result<Self> {
        Self::from_async(crate::Client::with_graph(graph, user_access_token))
    }

    /// Wrap an existing async client
    pub fn from_async(inner: crate::Client<G>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::Runtime)?;

        Ok(Self { inner, runtime })
    }

    /// The async client this one drives
    pub fn as_async(&self) -> &crate::Client<G> {
        &self.inner
    }

    /// See [`crate::Client::get_accounts`]
    pub fn get_accounts(&self) -> Result<Vec<Account>> {
        self.runtime.block_on(self.inner.get_accounts())
    }

    /// See [`crate::Client::get_posts`]
    pub fn get_posts(&self, account: &Account) -> Result<Vec<Post>> {
        self.runtime.block_on(self.inner.get_posts(account))
    }

    /// See [`crate::Client::get_comments`]
    pub fn get_comments(&self, account: &Account, post: &Post) -> Result<Vec<Comment>> {
        self.runtime
            .block_on(self.inner.get_comments(account, post))
    }

    /// See [`crate::Client::get_comment_replies`]
    pub fn get_comment_replies(&self, account: &Account, comment: &Comment) -> Result<Vec<Comment>> {
        self.runtime
            .block_on(self.inner.get_comment_replies(account, comment))
    }

    /// See [`crate::Client::put_comment`]
    pub fn put_comment(&self, account: &Account, post: &Post, message: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.put_comment(account, post, message))
    }

    /// See [`crate::Client::reply_comment`]
    pub fn reply_comment(&self, account: &Account, comment: &Comment, message: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.reply_comment(account, comment, message))
    }
}
