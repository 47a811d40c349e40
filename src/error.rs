use thiserror::Error;

/// Errors reported by a collaborator (object store or filesystem).
pub type RemoteError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum GoesFetchError {
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    #[error("malformed object key {key:?}: {reason}")]
    MalformedKey { key: String, reason: &'static str },

    #[error("listing query failed for prefix {prefix}: {source}")]
    Search {
        prefix: String,
        #[source]
        source: RemoteError,
    },

    #[error("transfer failed: {0}")]
    Transfer(String),

    #[error("object key would escape the output directory: {0}")]
    UnsafeKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("coordinator failed: {0}")]
    Coordinator(String),
}
