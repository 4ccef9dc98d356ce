use crate::prelude::*;

/// Graph API configuration
#[derive(Clone)]
pub struct GraphConfig {
    pub base_url: String,
    pub api_version: String,
    pub user_access_token: String,
    /// Stop a traversal with an error after this many pages; `None` follows cursors until exhaustion
    pub max_pages: Option<usize>,
}

impl GraphConfig {
    /// Default Graph API host
    pub const DEFAULT_BASE_URL: &'static str = "https://graph.facebook.com";

    /// Default Graph API version
    pub const DEFAULT_API_VERSION: &'static str = "v21.0";

    /// Build a configuration with defaults, without reading the environment
    pub fn new(user_access_token: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
            user_access_token: user_access_token.into(),
            max_pages: None,
        }
    }

    /// Load configuration from environment variables
    /// Requires FACEBOOK_ACCESS_TOKEN
    /// Uses FACEBOOK_GRAPH_BASE_URL and FACEBOOK_GRAPH_API_VERSION with default fallbacks
    /// Uses FACEBOOK_GRAPH_MAX_PAGES if set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let user_access_token = lookup("FACEBOOK_ACCESS_TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                Error::Config("FACEBOOK_ACCESS_TOKEN environment variable not set".to_string())
            })?;

        let max_pages = match lookup("FACEBOOK_GRAPH_MAX_PAGES") {
            Some(raw) => Some(parse_max_pages(&raw)?),
            None => None,
        };

        Ok(Self {
            base_url: lookup("FACEBOOK_GRAPH_BASE_URL")
                .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            api_version: lookup("FACEBOOK_GRAPH_API_VERSION")
                .unwrap_or_else(|| Self::DEFAULT_API_VERSION.to_string()),
            user_access_token,
            max_pages,
        })
    }

    /// Apply caller overrides to the configuration
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        api_version: Option<String>,
        user_access_token: Option<String>,
    ) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(version) = api_version {
            self.api_version = version;
        }
        if let Some(token) = user_access_token {
            self.user_access_token = token;
        }
        self
    }

    /// Cap every traversal at `max_pages` pages
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("user_access_token", &"<redacted>")
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

fn parse_max_pages(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(pages) if pages > 0 => Ok(pages),
        _ => Err(Error::Config(f!(
            "FACEBOOK_GRAPH_MAX_PAGES must be a positive integer, got {raw:?}"
        ))),
    }
}
