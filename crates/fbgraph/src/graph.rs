//! Graph API transport
//!
//! [`GraphApi`] is the upstream capability the rest of the crate consumes: fetch one
//! page of a connection, and create an object under a parent. [`HttpGraphApi`] is the
//! reqwest implementation. It performs exactly one request per call and never
//! retries; retry and backoff policy belongs to the caller.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::GraphConfig;
use crate::prelude::*;

/// Query parameters or form fields sent with a Graph API call
pub type Params = BTreeMap<String, String>;

/// Build [`Params`] from string pairs
pub fn params<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Params
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// The two Graph API primitives used by the client
///
/// The access token is passed per call so one transport can serve the user token
/// and any number of page tokens. [`HttpGraphApi`] sends it in the `Authorization`
/// header so it never appears in a request URL or an error message.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Fetch one page of `{id}/{connection_name}`
    ///
    /// Returns the raw response body: a `data` array plus optional `paging`.
    async fn get_connections(
        &self,
        access_token: &str,
        id: &str,
        connection_name: &str,
        params: &Params,
    ) -> Result<Value>;

    /// Create an object under `{parent_object}/{connection_name}`
    async fn put_object(
        &self,
        access_token: &str,
        parent_object: &str,
        connection_name: &str,
        data: &Params,
    ) -> Result<Value>;
}

#[async_trait]
impl<T: GraphApi + ?Sized> GraphApi for std::sync::Arc<T> {
    async fn get_connections(
        &self,
        access_token: &str,
        id: &str,
        connection_name: &str,
        params: &Params,
    ) -> Result<Value> {
        (**self)
            .get_connections(access_token, id, connection_name, params)
            .await
    }

    async fn put_object(
        &self,
        access_token: &str,
        parent_object: &str,
        connection_name: &str,
        data: &Params,
    ) -> Result<Value> {
        (**self)
            .put_object(access_token, parent_object, connection_name, data)
            .await
    }
}

/// Graph API over HTTPS
#[derive(Debug, Clone)]
pub struct HttpGraphApi {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
}

impl HttpGraphApi {
    /// Create a transport with a fresh HTTP client
    pub fn new(config: &GraphConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fbgraph/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Create a transport over an existing HTTP client
    pub fn with_client(client: reqwest::Client, config: &GraphConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.trim_matches('/').to_string(),
        }
    }

    fn url(&self, id: &str, connection_name: &str) -> String {
        let id = urlencoding::encode(id);
        let connection_name = urlencoding::encode(connection_name);

        if self.api_version.is_empty() {
            f!("{}/{}/{}", self.base_url, id, connection_name)
        } else {
            f!(
                "{}/{}/{}/{}",
                self.base_url,
                self.api_version,
                id,
                connection_name
            )
        }
    }
}

#[async_trait]
impl GraphApi for HttpGraphApi {
    async fn get_connections(
        &self,
        access_token: &str,
        id: &str,
        connection_name: &str,
        params: &Params,
    ) -> Result<Value> {
        let url = self.url(id, connection_name);
        log::debug!("GET {}/{} {:?}", id, connection_name, params.keys());

        let response = self
            .client
            .get(&url)
            .query(params)
            .bearer_auth(access_token)
            .send()
            .await?;

        read_response(response).await
    }

    async fn put_object(
        &self,
        access_token: &str,
        parent_object: &str,
        connection_name: &str,
        data: &Params,
    ) -> Result<Value> {
        let url = self.url(parent_object, connection_name);
        log::debug!("POST {}/{}", parent_object, connection_name);

        let response = self
            .client
            .post(&url)
            .form(data)
            .bearer_auth(access_token)
            .send()
            .await?;

        read_response(response).await
    }
}

// =============================================================================
// Response handling
// =============================================================================

/// Error envelope returned by the Graph API
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    error_subcode: Option<i64>,
    #[serde(default)]
    fbtrace_id: Option<String>,
}

async fn read_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            let reason = status.canonical_reason().unwrap_or("Unknown status");
            return Err(api_error(status.as_u16(), reason));
        }
        return Err(api_error(status.as_u16(), &body));
    }

    let body: Value = response.json().await?;

    // The Graph API occasionally reports failures inside a 200 response
    if body.get("error").is_some_and(Value::is_object) {
        return Err(api_error(status.as_u16(), &body.to_string()));
    }

    Ok(body)
}

/// Convert an error response body into [`Error::Api`]
pub(crate) fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => Error::Api {
            status,
            message: error.message,
            kind: error.kind,
            code: error.code,
            subcode: error.error_subcode,
            fbtrace_id: error.fbtrace_id,
        },
        Err(_) => Error::Api {
            status,
            message: body.to_string(),
            kind: None,
            code: None,
            subcode: None,
            fbtrace_id: None,
        },
    }
}
