//! Relational store contract for assets and users.
//!
//! Backends execute every multi-statement write inside one transaction per
//! logical step and guarantee the connection returns to the pool on every
//! exit path. Inserts return the full persisted row, including the
//! store-generated identity column — callers never pre-generate ids.

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::RegistryStore;
