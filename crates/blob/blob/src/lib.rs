//! Object store contract for image blobs.

pub mod error;
pub mod store;

pub use error::BlobError;
pub use store::BlobStore;
