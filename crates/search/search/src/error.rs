use thiserror::Error;

/// Errors from a search index backend.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The index could not be reached or the request failed.
    #[error("search index error: {0}")]
    Index(String),

    /// A document or response failed to serialize or deserialize.
    #[error("search serialization error: {0}")]
    Serialization(String),
}
