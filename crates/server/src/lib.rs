//! HTTP server for the Stockroom asset registry.
//!
//! Routing, JWT issuance and verification, password hashing and config
//! loading live here; everything that touches the three external systems
//! goes through the pipeline crate.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;
