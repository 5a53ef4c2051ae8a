use thiserror::Error;

use stockroom_image::ImageError;
use stockroom_search::error::SearchError;
use stockroom_store::error::StoreError;

/// Errors surfaced to callers of the registry pipeline.
///
/// Only validation failures, primary-write failures and read-path
/// failures reach the caller. Upload, patch and index failures on the
/// write path are logged inside the pipeline and never appear here.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The inline image payload was rejected before any write.
    #[error(transparent)]
    Validation(#[from] ImageError),

    /// The relational insert, update or read failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A search query failed. Raised only on the read path; write-path
    /// index upserts are best-effort.
    #[error(transparent)]
    Search(#[from] SearchError),
}
