/// Errors that can occur during relational store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A connection could not be leased from the pool.
    #[error("connection error: {0}")]
    Connection(String),

    /// A statement failed inside a transaction; the transaction was rolled
    /// back before this error was returned.
    #[error("statement error: {0}")]
    Statement(String),

    /// The targeted row does not exist.
    #[error("row not found: {0}")]
    RowNotFound(String),
}
