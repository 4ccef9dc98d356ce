//! Cursor pagination over Graph API connections
//!
//! Pure functions for reading a connection response and deciding whether another
//! page should be requested. The shell owns the request loop; this module owns the
//! rules:
//!
//! - a page contributes its `data` array (a missing or non-array `data` contributes nothing)
//! - the next page exists only if `paging.cursors.after` is a non-empty string
//! - any other paging shape is end-of-data, never an error
//!
//! [`CursorTrail`] adds the loop guards: a cursor that was already followed, or an
//! optional page limit, stops the traversal with a [`PaginationError`].

use serde_json::Value;
use std::collections::HashSet;

/// Query parameter carrying the cursor for the next page
pub const AFTER_PARAM: &str = "after";

/// Error type for pagination operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    CursorCycle(String),
    PageLimitExceeded(usize),
}

impl std::fmt::Display for PaginationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaginationError::CursorCycle(cursor) => {
                write!(f, "Server returned an already visited cursor: {}", cursor)
            }
            PaginationError::PageLimitExceeded(limit) => {
                write!(f, "More data remains after the page limit of {}", limit)
            }
        }
    }
}

impl std::error::Error for PaginationError {}

/// One page of a connection response
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectionPage {
    pub data: Vec<Value>,
    /// Cursor for the next page, if the server reported one
    pub after: Option<String>,
}

impl ConnectionPage {
    /// Split a raw connection response into its items and next cursor
    pub fn from_response(mut response: Value) -> Self {
        let after = next_cursor(&response).map(str::to_string);

        let data = match response.get_mut("data").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        Self { data, after }
    }
}

/// Extract `paging.cursors.after` from a connection response
///
/// Returns `None` when any level is missing, null, not the expected type, or when
/// the cursor is an empty string.
pub fn next_cursor(response: &Value) -> Option<&str> {
    response
        .get("paging")?
        .get("cursors")?
        .get(AFTER_PARAM)?
        .as_str()
        .filter(|cursor| !cursor.is_empty())
}

/// Bookkeeping for one traversal of a connection
#[derive(Debug, Clone, Default)]
pub struct CursorTrail {
    seen: HashSet<String>,
    pages: usize,
    max_pages: Option<usize>,
}

impl CursorTrail {
    /// Start a traversal, optionally capped at `max_pages` pages
    pub fn new(max_pages: Option<usize>) -> Self {
        Self {
            seen: HashSet::new(),
            pages: 0,
            max_pages,
        }
    }

    /// Number of pages recorded so far
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Record that a page has been received
    pub fn record_page(&mut self) {
        self.pages += 1;
    }

    /// Accept `cursor` as the next page to fetch
    ///
    /// Fails if the page limit has been reached or the cursor was already followed
    /// in this traversal.
    pub fn advance(&mut self, cursor: &str) -> Result<(), PaginationError> {
        if let Some(limit) = self.max_pages {
            if self.pages >= limit {
                return Err(PaginationError::PageLimitExceeded(limit));
            }
        }

        if !self.seen.insert(cursor.to_string()) {
            return Err(PaginationError::CursorCycle(cursor.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_with_cursor() {
        let response = json!({
            "data": [{"id": "1"}, {"id": "2"}],
            "paging": {
                "cursors": {"before": "QVFIUk1", "after": "QVFIUlZA"},
                "next": "https://graph.facebook.com/v21.0/me/accounts?after=QVFIUlZA"
            }
        });

        let page = ConnectionPage::from_response(response);

        assert_eq!(page.data, vec![json!({"id": "1"}), json!({"id": "2"})]);
        assert_eq!(page.after.as_deref(), Some("QVFIUlZA"));
    }

    #[test]
    fn test_from_response_last_page() {
        let response = json!({
            "data": [{"id": "3"}],
            "paging": {"cursors": {"before": "QVFIUk1"}}
        });

        let page = ConnectionPage::from_response(response);

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.after, None);
    }

    #[test]
    fn test_from_response_without_data() {
        let page = ConnectionPage::from_response(json!({"paging": {}}));
        assert!(page.data.is_empty());

        let page = ConnectionPage::from_response(json!({"data": {"id": "1"}}));
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_next_cursor_malformed_paging() {
        let cases = [
            json!({}),
            json!({"paging": null}),
            json!({"paging": "yes"}),
            json!({"paging": {}}),
            json!({"paging": {"cursors": null}}),
            json!({"paging": {"cursors": {}}}),
            json!({"paging": {"cursors": {"after": null}}}),
            json!({"paging": {"cursors": {"after": ""}}}),
            json!({"paging": {"cursors": {"after": 42}}}),
            json!([1, 2, 3]),
        ];

        for case in cases {
            assert_eq!(next_cursor(&case), None, "case: {case}");
        }
    }

    #[test]
    fn test_trail_unbounded() {
        let mut trail = CursorTrail::new(None);

        for n in 0..1000 {
            trail.record_page();
            trail.advance(&format!("cursor-{n}")).unwrap();
        }

        assert_eq!(trail.pages(), 1000);
    }

    #[test]
    fn test_trail_detects_cycle() {
        let mut trail = CursorTrail::new(None);

        trail.record_page();
        trail.advance("A").unwrap();
        trail.record_page();
        trail.advance("B").unwrap();
        trail.record_page();

        assert_eq!(
            trail.advance("A"),
            Err(PaginationError::CursorCycle("A".to_string()))
        );
    }

    #[test]
    fn test_trail_page_limit() {
        let mut trail = CursorTrail::new(Some(2));

        trail.record_page();
        trail.advance("A").unwrap();
        trail.record_page();

        let err = trail.advance("B").unwrap_err();
        assert_eq!(err, PaginationError::PageLimitExceeded(2));
        assert_eq!(
            err.to_string(),
            "More data remains after the page limit of 2"
        );
    }
}
