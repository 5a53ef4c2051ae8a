//! Write-commit pipeline: the sequence that validates an inline image,
//! persists the relational row, uploads the image keyed by the new id,
//! patches the row with the upload URL, and mirrors the record into the
//! search index.
//!
//! The relational insert or update is strict; the upload, patch and
//! index steps are best-effort. Their failures are logged and the
//! operation still succeeds with the entity as the primary write left it.

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{Registry, RegistryBuilder};
