use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use stockroom_core::{Asset, AssetUpdate, NewAsset, NewUser, User};
use stockroom_store::error::StoreError;
use stockroom_store::store::RegistryStore;

/// In-memory registry store using `DashMap`. Suitable for development and
/// testing.
///
/// Ids are assigned from process-local sequences, mimicking the relational
/// store's identity columns.
pub struct MemoryRegistryStore {
    assets: DashMap<i64, Asset>,
    users: DashMap<i64, User>,
    next_asset_id: AtomicI64,
    next_user_id: AtomicI64,
}

impl MemoryRegistryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            assets: DashMap::new(),
            users: DashMap::new(),
            next_asset_id: AtomicI64::new(1),
            next_user_id: AtomicI64::new(1),
        }
    }

    /// Number of asset rows currently stored.
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Number of user rows currently stored.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl Default for MemoryRegistryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryStore for MemoryRegistryStore {
    async fn insert_asset(
        &self,
        user_id: i64,
        new: &NewAsset,
        image_url: &str,
    ) -> Result<Asset, StoreError> {
        let asset_id = self.next_asset_id.fetch_add(1, Ordering::SeqCst);
        let asset = Asset {
            asset_id,
            user_id,
            user_asset_state: 0,
            asset_name: new.asset_name.clone(),
            asset_type: new.asset_type.clone(),
            asset_description: new.asset_description.clone(),
            asset_image_url: image_url.to_owned(),
            asset_serial_number: new.asset_serial_number.clone(),
        };
        self.assets.insert(asset_id, asset.clone());
        Ok(asset)
    }

    async fn patch_asset_image_url(&self, asset_id: i64, url: &str) -> Result<Asset, StoreError> {
        let mut entry = self
            .assets
            .get_mut(&asset_id)
            .ok_or_else(|| StoreError::RowNotFound(format!("asset {asset_id}")))?;
        entry.asset_image_url = url.to_owned();
        Ok(entry.value().clone())
    }

    async fn update_asset(&self, update: &AssetUpdate) -> Result<Asset, StoreError> {
        let mut entry = self
            .assets
            .get_mut(&update.asset_id)
            .ok_or_else(|| StoreError::RowNotFound(format!("asset {}", update.asset_id)))?;
        entry.user_asset_state = update.user_asset_state;
        entry.asset_name = update.asset_name.clone();
        entry.asset_type = update.asset_type.clone();
        entry.asset_description = update.asset_description.clone();
        entry.asset_image_url = update.asset_image_url.clone();
        entry.asset_serial_number = update.asset_serial_number.clone();
        Ok(entry.value().clone())
    }

    async fn assets_for_user(&self, user_id: i64) -> Result<Vec<Asset>, StoreError> {
        let mut assets: Vec<Asset> = self
            .assets
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        assets.sort_by_key(|a| a.asset_id);
        Ok(assets)
    }

    async fn asset_by_id(&self, asset_id: i64) -> Result<Option<Asset>, StoreError> {
        Ok(self.assets.get(&asset_id).map(|entry| entry.value().clone()))
    }

    async fn insert_user(&self, new: &NewUser, image_url: &str) -> Result<User, StoreError> {
        let user_id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            user_id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            email: new.email.clone(),
            user_image_url: image_url.to_owned(),
            password_hash: new.password_hash.clone(),
            verified: false,
            created: Utc::now(),
        };
        self.users.insert(user_id, user.clone());
        Ok(user)
    }

    async fn patch_user_image_url(&self, user_id: i64, url: &str) -> Result<User, StoreError> {
        let mut entry = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| StoreError::RowNotFound(format!("user {user_id}")))?;
        entry.user_image_url = url.to_owned();
        Ok(entry.value().clone())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut matches: Vec<User> = self
            .users
            .iter()
            .filter(|entry| entry.email == email)
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|u| u.user_id);
        Ok(matches.into_iter().next())
    }
}
