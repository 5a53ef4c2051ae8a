//! AWS S3 backend for the Stockroom object store contract.

pub mod config;
pub mod store;

pub use config::S3Config;
pub use store::S3BlobStore;
