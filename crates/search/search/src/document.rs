use serde::{Deserialize, Serialize};

use stockroom_core::Asset;

/// The denormalized asset document mirrored into the search index.
///
/// All fields are stringified so the index treats them uniformly as
/// keyword text. The canonical record lives in the relational store;
/// documents here may lag behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDocument {
    pub asset_id: String,
    pub user_id: String,
    pub user_asset_state: String,
    pub asset_name: String,
    pub asset_type: String,
    pub asset_description: String,
    pub asset_image_url: String,
    pub asset_serial_number: String,
}

impl From<&Asset> for AssetDocument {
    fn from(asset: &Asset) -> Self {
        Self {
            asset_id: asset.asset_id.to_string(),
            user_id: asset.user_id.to_string(),
            user_asset_state: asset.user_asset_state.to_string(),
            asset_name: asset.asset_name.clone(),
            asset_type: asset.asset_type.clone(),
            asset_description: asset.asset_description.clone(),
            asset_image_url: asset.asset_image_url.clone(),
            asset_serial_number: asset.asset_serial_number.clone(),
        }
    }
}
