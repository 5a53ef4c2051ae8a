use serde::{Deserialize, Serialize};

/// One registered physical item, as persisted in the relational store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Identity, generated by the relational store on insert.
    pub asset_id: i64,
    /// Owning user (foreign key, immutable after creation).
    pub user_id: i64,
    /// Small state enum; `0` at creation.
    pub user_asset_state: i32,
    pub asset_name: String,
    pub asset_type: String,
    pub asset_description: String,
    /// Either the placeholder URL or an object-store URL whose key embeds
    /// this asset's own `asset_id`.
    pub asset_image_url: String,
    pub asset_serial_number: String,
}

impl Asset {
    /// Object-store key for this asset's image blob.
    pub fn blob_key(&self) -> String {
        asset_blob_key(self.asset_id)
    }
}

/// Fields supplied by the client when creating an asset.
///
/// The generated id, owner, state, and image URL are assigned server-side;
/// the inline image payload travels separately from these columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAsset {
    pub asset_name: String,
    pub asset_type: String,
    pub asset_description: String,
    pub asset_serial_number: String,
}

/// Full set of mutable columns for the asset update path, keyed by the
/// existing `asset_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetUpdate {
    pub asset_id: i64,
    pub user_asset_state: i32,
    pub asset_name: String,
    pub asset_type: String,
    pub asset_description: String,
    /// Client-supplied image URL; replaced by a fresh upload's URL when the
    /// update carries a new image payload.
    pub asset_image_url: String,
    pub asset_serial_number: String,
}

/// Deterministic object-store key for an asset's image: `asset_id_<id>`.
///
/// Keys are collision-free because ids are assigned once by the relational
/// store; a re-upload under the same key overwrites (last writer wins).
pub fn asset_blob_key(asset_id: i64) -> String {
    format!("asset_id_{asset_id}")
}
