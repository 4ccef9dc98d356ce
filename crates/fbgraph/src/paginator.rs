use fbgraph_core::pagination::{ConnectionPage, CursorTrail, PaginationError, AFTER_PARAM};

use crate::graph::{GraphApi, Params};
use crate::prelude::*;

/// Follows `after` cursors on a connection until the server stops returning one
pub struct Paginator<'a, G: ?Sized> {
    graph: &'a G,
    max_pages: Option<usize>,
}

impl<'a, G: GraphApi + ?Sized> Paginator<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            max_pages: None,
        }
    }

    /// Fail instead of fetching more than `max_pages` pages
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch every page of `{id}/{connection_name}` and concatenate their `data` arrays
    ///
    /// Items keep server order, within and across pages. A missing or malformed
    /// cursor ends the traversal; transport errors are returned as-is.
    pub async fn collect(
        &self,
        access_token: &str,
        id: &str,
        connection_name: &str,
        mut params: Params,
    ) -> Result<Vec<Value>> {
        let mut all_data = Vec::new();
        let mut trail = CursorTrail::new(self.max_pages);

        loop {
            let response = self
                .graph
                .get_connections(access_token, id, connection_name, &params)
                .await?;

            let page = ConnectionPage::from_response(response);
            trail.record_page();
            log::debug!(
                "{}/{} page {}: {} items",
                id,
                connection_name,
                trail.pages(),
                page.data.len()
            );

            all_data.extend(page.data);

            let Some(after) = page.after else {
                break;
            };

            trail
                .advance(&after)
                .map_err(|err| pagination_error(connection_name, err))?;
            params.insert(AFTER_PARAM.to_string(), after);
        }

        log::debug!(
            "{}/{} complete: {} items in {} pages",
            id,
            connection_name,
            all_data.len(),
            trail.pages()
        );

        Ok(all_data)
    }
}

fn pagination_error(connection_name: &str, err: PaginationError) -> Error {
    match err {
        PaginationError::CursorCycle(cursor) => Error::CursorCycle {
            connection: connection_name.to_string(),
            cursor,
        },
        PaginationError::PageLimitExceeded(limit) => Error::PageLimitExceeded {
            connection: connection_name.to_string(),
            limit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::params;
    use crate::testing::{page, server_error, Call, ScriptedGraph};
    use serde_json::json;

    fn ids(items: &[Value]) -> Vec<&str> {
        items.iter().filter_map(|i| i["id"].as_str()).collect()
    }

    fn sent_params(calls: &[Call]) -> Vec<Params> {
        calls
            .iter()
            .map(|call| match call {
                Call::Get { params, .. } => params.clone(),
                Call::Put { .. } => panic!("unexpected put"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_collects_pages_in_order() {
        let graph = ScriptedGraph::new(vec![
            Ok(page(vec![json!({"id": "1"}), json!({"id": "2"})], Some("c1"))),
            Ok(page(vec![json!({"id": "3"})], Some("c2"))),
            Ok(page(vec![json!({"id": "4"}), json!({"id": "5"})], None)),
        ]);

        let items = Paginator::new(&graph)
            .collect("token", "me", "accounts", params([("limit", "2")]))
            .await
            .unwrap();

        assert_eq!(ids(&items), vec!["1", "2", "3", "4", "5"]);

        let sent = sent_params(&graph.calls());
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].get("after"), None);
        assert_eq!(sent[1].get("after").map(String::as_str), Some("c1"));
        assert_eq!(sent[2].get("after").map(String::as_str), Some("c2"));
        assert!(sent
            .iter()
            .all(|p| p.get("limit").map(String::as_str) == Some("2")));
    }

    #[tokio::test]
    async fn test_stops_on_null_or_empty_cursor() {
        for last in [
            json!({"data": [{"id": "2"}], "paging": {"cursors": {"after": null}}}),
            json!({"data": [{"id": "2"}], "paging": {"cursors": {"after": ""}}}),
            json!({"data": [{"id": "2"}], "paging": {"cursors": {}}}),
            json!({"data": [{"id": "2"}], "paging": "garbage"}),
        ] {
            let graph = ScriptedGraph::new(vec![
                Ok(page(vec![json!({"id": "1"})], Some("c1"))),
                Ok(last),
            ]);

            let items = Paginator::new(&graph)
                .collect("token", "me", "accounts", Params::new())
                .await
                .unwrap();

            assert_eq!(ids(&items), vec!["1", "2"]);
            assert_eq!(graph.calls().len(), 2);
        }
    }

    #[tokio::test]
    async fn test_empty_connection() {
        let graph = ScriptedGraph::new(vec![Ok(json!({"data": []}))]);

        let items = Paginator::new(&graph)
            .collect("token", "1001", "posts", Params::new())
            .await
            .unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let graph = ScriptedGraph::new(vec![
            Ok(page(vec![json!({"id": "1"})], Some("c1"))),
            Err(server_error()),
        ]);

        let err = Paginator::new(&graph)
            .collect("token", "me", "accounts", Params::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api { status: 500, code: Some(2), .. }));
        assert_eq!(graph.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_cursor_cycle_is_an_error() {
        let graph = ScriptedGraph::new(vec![
            Ok(page(vec![json!({"id": "1"})], Some("c1"))),
            Ok(page(vec![json!({"id": "2"})], Some("c2"))),
            Ok(page(vec![json!({"id": "3"})], Some("c1"))),
        ]);

        let err = Paginator::new(&graph)
            .collect("token", "1001", "posts", Params::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::CursorCycle { ref connection, ref cursor } if connection == "posts" && cursor == "c1"
        ));
        assert_eq!(graph.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_page_limit() {
        let graph = ScriptedGraph::new(vec![
            Ok(page(vec![json!({"id": "1"})], Some("c1"))),
            Ok(page(vec![json!({"id": "2"})], Some("c2"))),
        ]);

        let err = Paginator::new(&graph)
            .with_max_pages(Some(2))
            .collect("token", "1001", "posts", Params::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::PageLimitExceeded { limit: 2, .. }));
        assert_eq!(graph.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_page_limit_not_hit_when_data_ends() {
        let graph = ScriptedGraph::new(vec![
            Ok(page(vec![json!({"id": "1"})], Some("c1"))),
            Ok(page(vec![json!({"id": "2"})], None)),
        ]);

        let items = Paginator::new(&graph)
            .with_max_pages(Some(2))
            .collect("token", "1001", "posts", Params::new())
            .await
            .unwrap();

        assert_eq!(ids(&items), vec!["1", "2"]);
    }
}
