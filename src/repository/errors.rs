use thiserror::Error;

/// Failures of a single upstream catalog request.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The request could not be sent or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The upstream answered with a non-success status.
    #[error("upstream answered {status} for {url}")]
    Status { status: u16, url: String },
    /// The body was not a valid listing page.
    #[error("malformed listing payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// The request URL could not be built from the configured base.
    #[error("invalid catalog url: {0}")]
    InvalidUrl(String),
}

impl RepositoryError {
    /// Whether repeating the request may succeed. A payload that failed to
    /// decode or a URL that failed to build will fail the same way again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<url::ParseError> for RepositoryError {
    fn from(value: url::ParseError) -> Self {
        Self::InvalidUrl(value.to_string())
    }
}
