use thiserror::Error;

/// Failures from the boards protocol layer. None of these are retried; the
/// command surface reports them and ends the operation.
#[derive(Debug, Error)]
pub enum BoardsError {
    #[error("invalid request: {0}")]
    Construction(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("WIQL request failed with status {status}: {body}")]
    Query { status: u16, body: String },

    #[error("batch request failed with status {status}: {body}")]
    Batch { status: u16, body: String },

    #[error("create request failed with status {status}: {body}")]
    Create { status: u16, body: String },

    #[error("iterations request failed with status {status}: {body}")]
    Iterations { status: u16, body: String },

    #[error("error decoding {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no work item ids given")]
    EmptyIdList,
}

impl BoardsError {
    pub fn decode(what: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { what, source }
    }
}
