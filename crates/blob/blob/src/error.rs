/// Errors that can occur during object store operations.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// The upload failed; carries the underlying cause. Never retried
    /// inside the gateway — retry policy belongs to the caller.
    #[error("upload error: {0}")]
    Upload(String),
}
