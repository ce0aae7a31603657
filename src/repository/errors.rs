use thiserror::Error;

/// Failure of a call against the remote document store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The store answered with a non-success status.
    #[error("store returned status {code}: {body}")]
    Status { code: u16, body: String },
    /// The response body did not match the expected wire format.
    #[error("failed to decode store response: {0}")]
    Decode(String),
    /// Connection settings are missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}

/// Convenient alias for results returned from repository calls.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
