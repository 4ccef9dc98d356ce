use fbgraph_core::NormalizeError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Graph API error [{status}]: {message}")]
    Api {
        status: u16,
        message: String,
        kind: Option<String>,
        code: Option<i64>,
        subcode: Option<i64>,
        fbtrace_id: Option<String>,
    },

    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Cursor cycle on connection {connection}: {cursor}")]
    CursorCycle { connection: String, cursor: String },

    #[error("Connection {connection} has more data after the page limit of {limit}")]
    PageLimitExceeded { connection: String, limit: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl Error {
    /// Graph API error code, when the server returned one
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => *code,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
