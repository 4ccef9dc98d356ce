//! Scripted in-memory Graph API for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::graph::{GraphApi, Params};
use crate::prelude::*;

/// A call received by [`ScriptedGraph`]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Get {
        access_token: String,
        id: String,
        connection_name: String,
        params: Params,
    },
    Put {
        access_token: String,
        parent_object: String,
        connection_name: String,
        data: Params,
    },
}

/// Replays queued responses in order and records every call
#[derive(Default)]
pub(crate) struct ScriptedGraph {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGraph {
    pub(crate) fn new(responses: Vec<Result<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, call: Call) -> Result<Value> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Config("no scripted response left".to_string())))
    }
}

#[async_trait]
impl GraphApi for ScriptedGraph {
    async fn get_connections(
        &self,
        access_token: &str,
        id: &str,
        connection_name: &str,
        params: &Params,
    ) -> Result<Value> {
        self.respond(Call::Get {
            access_token: access_token.to_string(),
            id: id.to_string(),
            connection_name: connection_name.to_string(),
            params: params.clone(),
        })
    }

    async fn put_object(
        &self,
        access_token: &str,
        parent_object: &str,
        connection_name: &str,
        data: &Params,
    ) -> Result<Value> {
        self.respond(Call::Put {
            access_token: access_token.to_string(),
            parent_object: parent_object.to_string(),
            connection_name: connection_name.to_string(),
            data: data.clone(),
        })
    }
}

/// A connection page with an optional `after` cursor
pub(crate) fn page(data: Vec<Value>, after: Option<&str>) -> Value {
    match after {
        Some(cursor) => json!({
            "data": data,
            "paging": {"cursors": {"before": "start", "after": cursor}}
        }),
        None => json!({"data": data}),
    }
}

/// A transport failure the way [`crate::graph::HttpGraphApi`] would report a 500
pub(crate) fn server_error() -> Error {
    Error::Api {
        status: 500,
        message: "An unexpected error has occurred. Please retry your request later.".to_string(),
        kind: Some("OAuthException".to_string()),
        code: Some(2),
        subcode: None,
        fbtrace_id: Some("A1b2C3".to_string()),
    }
}
