//! PostgreSQL backend for the Stockroom relational store contract.

pub mod config;
pub mod migrations;
pub mod store;

pub use config::PostgresConfig;
pub use store::PostgresRegistryStore;
