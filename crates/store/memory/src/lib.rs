//! In-memory backend for the Stockroom relational store contract.

pub mod store;

pub use store::MemoryRegistryStore;
