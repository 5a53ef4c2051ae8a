//! Core domain types for the Stockroom asset registry.
//!
//! An [`Asset`] is one registered physical item owned by a [`User`]. Both
//! carry an image URL that starts out as [`PLACEHOLDER_IMAGE_URL`] and is
//! patched to a real object-store URL once the image upload lands.

pub mod asset;
pub mod user;

pub use asset::{Asset, AssetUpdate, NewAsset, asset_blob_key};
pub use user::{NewUser, User, user_blob_key};

/// Fixed default image URL assigned before any real image is attached.
///
/// An entity whose image upload failed (or that never had an image) keeps
/// this URL; callers must treat image URLs as best-effort.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/600";
