use fbgraph_core::fields::{ACCOUNTS, COMMENTS, COMMENT_FIELDS, ME, POSTS, POST_FIELDS};
use fbgraph_core::normalize::{
    normalize_account, normalize_all, normalize_comment, normalize_post, NormalizeError,
};

use crate::config::GraphConfig;
use crate::graph::{params, GraphApi, HttpGraphApi, Params};
use crate::paginator::Paginator;
use crate::prelude::*;

/// Client for managing Facebook pages, posts and comments
///
/// Constructed with a user access token, which is only used to list the pages the
/// user manages. Every page, post and comment operation runs with the page token
/// carried by the [`Account`] it is given.
///
/// Calls are independent: nothing is cached between them and reads are only as
/// consistent as the Graph API itself.
pub struct Client<G = HttpGraphApi> {
    graph: G,
    user_access_token: String,
    max_pages: Option<usize>,
}

impl Client<HttpGraphApi> {
    /// Create a client against the public Graph API with default settings
    pub fn new(user_access_token: impl Into<String>) -> Result<Self> {
        Self::from_config(GraphConfig::new(user_access_token))
    }

    /// Create a client from an explicit configuration
    pub fn from_config(config: GraphConfig) -> Result<Self> {
        let graph = HttpGraphApi::new(&config)?;

        Ok(Self::with_graph(graph, config.user_access_token).with_max_pages(config.max_pages))
    }

    /// Create a client from `FACEBOOK_*` environment variables, see [`GraphConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        Self::from_config(GraphConfig::from_env()?)
    }
}

impl<G: GraphApi> Client<G> {
    /// Create a client over any [`GraphApi`] implementation
    pub fn with_graph(graph: G, user_access_token: impl Into<String>) -> Self {
        Self {
            graph,
            user_access_token: user_access_token.into(),
            max_pages: None,
        }
    }

    /// Cap every paginated read at `max_pages` pages
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// The underlying transport
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Retrieve every page (account) the authenticated user manages, with its page token
    pub async fn get_accounts(&self) -> Result<Vec<Account>> {
        log::info!("Fetching accounts for {}", ME);

        self.fetch_all(
            &self.user_access_token,
            ME,
            ACCOUNTS,
            Params::new(),
            normalize_account,
        )
        .await
    }

    /// Retrieve every post published by `account`
    pub async fn get_posts(&self, account: &Account) -> Result<Vec<Post>> {
        log::info!("Fetching posts for account {}", account.id);

        self.fetch_all(
            &account.access_token,
            &account.id,
            POSTS,
            params([("fields", POST_FIELDS)]),
            normalize_post,
        )
        .await
    }

    /// Retrieve every comment on `post`
    pub async fn get_comments(&self, account: &Account, post: &Post) -> Result<Vec<Comment>> {
        log::info!("Fetching comments for post {}", post.id);

        self.fetch_all(
            &account.access_token,
            &post.id,
            COMMENTS,
            params([("fields", COMMENT_FIELDS)]),
            normalize_comment,
        )
        .await
    }

    /// Retrieve every reply to `comment`
    pub async fn get_comment_replies(
        &self,
        account: &Account,
        comment: &Comment,
    ) -> Result<Vec<Comment>> {
        log::info!("Fetching replies to comment {}", comment.id);

        self.fetch_all(
            &account.access_token,
            &comment.id,
            COMMENTS,
            params([("fields", COMMENT_FIELDS)]),
            normalize_comment,
        )
        .await
    }

    /// Comment on `post` as `account`
    ///
    /// Issues exactly one request; failures are returned without retrying.
    pub async fn put_comment(&self, account: &Account, post: &Post, message: &str) -> Result<()> {
        log::info!("Commenting on post {} as account {}", post.id, account.id);

        self.put_message(&account.access_token, &post.id, message)
            .await
    }

    /// Reply to `comment` as `account`
    ///
    /// Issues exactly one request; failures are returned without retrying.
    pub async fn reply_comment(
        &self,
        account: &Account,
        comment: &Comment,
        message: &str,
    ) -> Result<()> {
        log::info!(
            "Replying to comment {} as account {}",
            comment.id,
            account.id
        );

        self.put_message(&account.access_token, &comment.id, message)
            .await
    }

    async fn fetch_all<T>(
        &self,
        access_token: &str,
        id: &str,
        connection_name: &str,
        params: Params,
        normalize: fn(&Value) -> std::result::Result<T, NormalizeError>,
    ) -> Result<Vec<T>> {
        let raw = Paginator::new(&self.graph)
            .with_max_pages(self.max_pages)
            .collect(access_token, id, connection_name, params)
            .await?;

        Ok(normalize_all(&raw, normalize)?)
    }

    async fn put_message(&self, access_token: &str, parent_object: &str, message: &str) -> Result<()> {
        // The created object's id is not needed by callers
        let _ = self
            .graph
            .put_object(
                access_token,
                parent_object,
                COMMENTS,
                &params([("message", message)]),
            )
            .await?;

        Ok(())
    }
}

impl<G> std::fmt::Debug for Client<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("user_access_token", &"<redacted>")
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}
