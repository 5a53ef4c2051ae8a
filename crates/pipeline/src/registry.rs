use std::sync::Arc;

use tracing::{debug, instrument, warn};

use stockroom_blob::store::BlobStore;
use stockroom_core::{
    Asset, AssetUpdate, NewAsset, NewUser, PLACEHOLDER_IMAGE_URL, User, asset_blob_key,
};
use stockroom_image::{PendingImage, classify_and_decode};
use stockroom_search::document::AssetDocument;
use stockroom_search::index::SearchIndex;
use stockroom_store::store::RegistryStore;

use crate::error::RegistryError;

/// The write-commit orchestrator.
///
/// Owns the three gateways and sequences every create and update through
/// the pipeline: validate, insert, upload, patch, index. The relational
/// write is strict; upload, patch and index are best-effort. A failed
/// best-effort step leaves the entity as the primary write left it, so
/// callers must treat image URLs and index documents as possibly lagging.
pub struct Registry {
    store: Arc<dyn RegistryStore>,
    blobs: Arc<dyn BlobStore>,
    index: Arc<dyn SearchIndex>,
    assets_bucket: String,
    users_bucket: String,
}

/// Builder for [`Registry`].
pub struct RegistryBuilder {
    store: Arc<dyn RegistryStore>,
    blobs: Arc<dyn BlobStore>,
    index: Arc<dyn SearchIndex>,
    assets_bucket: String,
    users_bucket: String,
}

impl RegistryBuilder {
    pub fn new(
        store: Arc<dyn RegistryStore>,
        blobs: Arc<dyn BlobStore>,
        index: Arc<dyn SearchIndex>,
    ) -> Self {
        Self {
            store,
            blobs,
            index,
            assets_bucket: String::from("asset-registry-assets"),
            users_bucket: String::from("asset-registry-users"),
        }
    }

    /// Bucket holding asset image blobs.
    #[must_use]
    pub fn assets_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.assets_bucket = bucket.into();
        self
    }

    /// Bucket holding user image blobs.
    #[must_use]
    pub fn users_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.users_bucket = bucket.into();
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            store: self.store,
            blobs: self.blobs,
            index: self.index,
            assets_bucket: self.assets_bucket,
            users_bucket: self.users_bucket,
        }
    }
}

/// Decode the inline payload, treating the empty string as "no image".
fn prepare_image(payload: &str) -> Result<Option<PendingImage>, RegistryError> {
    if payload.is_empty() {
        return Ok(None);
    }
    Ok(Some(classify_and_decode(payload)?))
}

impl Registry {
    pub fn builder(
        store: Arc<dyn RegistryStore>,
        blobs: Arc<dyn BlobStore>,
        index: Arc<dyn SearchIndex>,
    ) -> RegistryBuilder {
        RegistryBuilder::new(store, blobs, index)
    }

    /// Create an asset for `user_id` through the full pipeline.
    ///
    /// An invalid image payload aborts before any write. The insert is
    /// strict. Upload, patch and index failures are logged and the asset
    /// is returned as it stands after the last successful step.
    #[instrument(skip_all, fields(user_id))]
    pub async fn create_asset(
        &self,
        user_id: i64,
        new_asset: &NewAsset,
        image_payload: &str,
    ) -> Result<Asset, RegistryError> {
        let pending = prepare_image(image_payload)?;

        let asset = self
            .store
            .insert_asset(user_id, new_asset, PLACEHOLDER_IMAGE_URL)
            .await?;
        debug!(asset_id = asset.asset_id, user_id, "asset row inserted");

        let asset = match pending {
            Some(image) => self.attach_asset_image(asset, image).await,
            None => asset,
        };

        self.index_asset(&asset).await;
        Ok(asset)
    }

    /// Create a user through the same pipeline, minus the indexing step
    /// (only assets are mirrored into the search index).
    #[instrument(skip_all)]
    pub async fn create_user(
        &self,
        new_user: &NewUser,
        image_payload: &str,
    ) -> Result<User, RegistryError> {
        let pending = prepare_image(image_payload)?;

        let user = self
            .store
            .insert_user(new_user, PLACEHOLDER_IMAGE_URL)
            .await?;
        debug!(user_id = user.user_id, "user row inserted");

        match pending {
            Some(image) => Ok(self.attach_user_image(user, image).await),
            None => Ok(user),
        }
    }

    /// Update an asset's mutable columns in a single statement.
    ///
    /// When `is_image_change` is set and a payload is supplied, the image
    /// is decoded (aborting before any write on a codec error) and
    /// uploaded under the asset's existing key; the fresh upload URL then
    /// replaces the client-supplied one. The updated row is re-indexed
    /// best-effort.
    #[instrument(skip_all, fields(asset_id = update.asset_id))]
    pub async fn update_asset(
        &self,
        update: &AssetUpdate,
        is_image_change: bool,
        image_payload: &str,
    ) -> Result<Asset, RegistryError> {
        let mut update = update.clone();

        if is_image_change
            && let Some(image) = prepare_image(image_payload)?
        {
            let key = asset_blob_key(update.asset_id);
            match self
                .blobs
                .upload(&self.assets_bucket, &key, image.bytes, image.content_type)
                .await
            {
                Ok(url) => update.asset_image_url = url,
                Err(e) => warn!(
                    asset_id = update.asset_id,
                    error = %e,
                    "image upload failed, keeping submitted image URL"
                ),
            }
        }

        let asset = self.store.update_asset(&update).await?;
        self.index_asset(&asset).await;
        Ok(asset)
    }

    /// All assets owned by `user_id`.
    pub async fn assets_for_user(&self, user_id: i64) -> Result<Vec<Asset>, RegistryError> {
        Ok(self.store.assets_for_user(user_id).await?)
    }

    /// One asset by id, or `None`.
    pub async fn asset_by_id(&self, asset_id: i64) -> Result<Option<Asset>, RegistryError> {
        Ok(self.store.asset_by_id(asset_id).await?)
    }

    /// One user by email, or `None`.
    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, RegistryError> {
        Ok(self.store.user_by_email(email).await?)
    }

    /// Serial-number prefix search over the index mirror. Result order is
    /// engine-defined; documents may lag the relational rows.
    pub async fn search_serials(
        &self,
        prefix: &str,
        size: usize,
        from: usize,
    ) -> Result<Vec<AssetDocument>, RegistryError> {
        Ok(self.index.search_serial_prefix(prefix, size, from).await?)
    }

    /// Best-effort image attach: upload under the asset's key, then patch
    /// the row with the upload URL. Either failure leaves the asset with
    /// its placeholder URL.
    async fn attach_asset_image(&self, asset: Asset, image: PendingImage) -> Asset {
        let key = asset.blob_key();
        let url = match self
            .blobs
            .upload(&self.assets_bucket, &key, image.bytes, image.content_type)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    asset_id = asset.asset_id,
                    error = %e,
                    "asset image upload failed, keeping placeholder URL"
                );
                return asset;
            }
        };

        match self.store.patch_asset_image_url(asset.asset_id, &url).await {
            Ok(patched) => patched,
            Err(e) => {
                warn!(
                    asset_id = asset.asset_id,
                    error = %e,
                    "asset image URL patch failed, keeping placeholder URL"
                );
                asset
            }
        }
    }

    async fn attach_user_image(&self, user: User, image: PendingImage) -> User {
        let key = user.blob_key();
        let url = match self
            .blobs
            .upload(&self.users_bucket, &key, image.bytes, image.content_type)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    user_id = user.user_id,
                    error = %e,
                    "user image upload failed, keeping placeholder URL"
                );
                return user;
            }
        };

        match self.store.patch_user_image_url(user.user_id, &url).await {
            Ok(patched) => patched,
            Err(e) => {
                warn!(
                    user_id = user.user_id,
                    error = %e,
                    "user image URL patch failed, keeping placeholder URL"
                );
                user
            }
        }
    }

    /// Best-effort index mirror of the final known row.
    async fn index_asset(&self, asset: &Asset) {
        let document = AssetDocument::from(asset);
        if let Err(e) = self.index.upsert(&document).await {
            warn!(
                asset_id = asset.asset_id,
                error = %e,
                "search index upsert failed"
            );
        }
    }
}
