use async_trait::async_trait;

use stockroom_core::{Asset, AssetUpdate, NewAsset, NewUser, User};

use crate::error::StoreError;

/// Trait for the relational gateway over the `assets` and `users` tables.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// A connection leased for one call is exclusively owned by that call and
/// returned to the pool before it completes, on success and failure alike.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Insert an asset row with `user_asset_state = 0` and the given image
    /// URL, in its own transaction. Returns the full persisted row with the
    /// generated `asset_id`.
    async fn insert_asset(
        &self,
        user_id: i64,
        new: &NewAsset,
        image_url: &str,
    ) -> Result<Asset, StoreError>;

    /// Idempotent single-column image-URL update scoped to one asset by
    /// primary key, in its own transaction (the insert may already be
    /// durably committed before this is attempted).
    async fn patch_asset_image_url(&self, asset_id: i64, url: &str) -> Result<Asset, StoreError>;

    /// Update all mutable asset columns in one statement keyed by
    /// `update.asset_id`. Returns the updated row.
    async fn update_asset(&self, update: &AssetUpdate) -> Result<Asset, StoreError>;

    /// All assets owned by the given user.
    async fn assets_for_user(&self, user_id: i64) -> Result<Vec<Asset>, StoreError>;

    /// One asset by primary key, or `None`.
    async fn asset_by_id(&self, asset_id: i64) -> Result<Option<Asset>, StoreError>;

    /// Insert a user row with the given image URL, in its own transaction.
    /// Returns the full persisted row with the generated `user_id` and the
    /// server-assigned `created` timestamp.
    async fn insert_user(&self, new: &NewUser, image_url: &str) -> Result<User, StoreError>;

    /// Idempotent single-column image-URL update scoped to one user by
    /// primary key, in its own transaction.
    async fn patch_user_image_url(&self, user_id: i64, url: &str) -> Result<User, StoreError>;

    /// Look up a user by email, or `None`. Email uniqueness is not enforced
    /// at the data layer; ties resolve to the first row the store returns.
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
