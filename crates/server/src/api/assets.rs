use axum::extract::{Extension, Path, Query, State};
use axum::{Json, http::StatusCode};
use serde::Deserialize;

use stockroom_core::{AssetUpdate, NewAsset};

use super::AppState;
use crate::auth::AuthenticatedUser;
use crate::error::ServerError;

#[derive(Deserialize)]
pub struct CreateAssetRequest {
    pub new_asset: NewAssetBody,
    /// Owner override; defaults to the authenticated user.
    pub user_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct NewAssetBody {
    #[serde(default)]
    pub asset_name: String,
    #[serde(default)]
    pub asset_type: String,
    #[serde(default)]
    pub asset_description: String,
    #[serde(default)]
    pub asset_serial_number: String,
    /// Inline encoded image; empty means no image.
    #[serde(default)]
    pub asset_image: String,
}

/// `POST /assets` -- create an asset through the full write pipeline.
pub async fn create_asset(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServerError> {
    let owner = body.user_id.unwrap_or(caller.user_id);
    let new_asset = NewAsset {
        asset_name: body.new_asset.asset_name,
        asset_type: body.new_asset.asset_type,
        asset_description: body.new_asset.asset_description,
        asset_serial_number: body.new_asset.asset_serial_number,
    };

    let asset = state
        .registry
        .create_asset(owner, &new_asset, &body.new_asset.asset_image)
        .await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "new_asset": asset })),
    ))
}

#[derive(Deserialize)]
pub struct ListAssetsQuery {
    pub user_id: Option<i64>,
}

/// `GET /assets?user_id=ID` -- list assets owned by a user, defaulting to
/// the authenticated caller.
pub async fn list_assets(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<ListAssetsQuery>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let user_id = query.user_id.unwrap_or(caller.user_id);
    let assets = state.registry.assets_for_user(user_id).await?;
    Ok(Json(serde_json::json!({ "data": assets })))
}

/// `GET /assets/{id}` -- fetch one asset; an unknown id yields an empty
/// `data` array rather than an error.
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let assets: Vec<_> = state.registry.asset_by_id(id).await?.into_iter().collect();
    Ok(Json(serde_json::json!({ "data": assets })))
}

#[derive(Deserialize)]
pub struct UpdateAssetRequest {
    pub asset: AssetUpdateBody,
    #[serde(default)]
    pub is_image_change: bool,
}

#[derive(Deserialize)]
pub struct AssetUpdateBody {
    pub asset_id: i64,
    #[serde(default)]
    pub user_asset_state: i32,
    #[serde(default)]
    pub asset_name: String,
    #[serde(default)]
    pub asset_type: String,
    #[serde(default)]
    pub asset_description: String,
    #[serde(default)]
    pub asset_image_url: String,
    #[serde(default)]
    pub asset_serial_number: String,
    /// Fresh inline image, honored only when `is_image_change` is set.
    #[serde(default)]
    pub asset_image: String,
}

/// `PUT /assets` -- update an asset's mutable columns, optionally with a
/// replacement image.
pub async fn update_asset(
    State(state): State<AppState>,
    Json(body): Json<UpdateAssetRequest>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let update = AssetUpdate {
        asset_id: body.asset.asset_id,
        user_asset_state: body.asset.user_asset_state,
        asset_name: body.asset.asset_name,
        asset_type: body.asset.asset_type,
        asset_description: body.asset.asset_description,
        asset_image_url: body.asset.asset_image_url,
        asset_serial_number: body.asset.asset_serial_number,
    };

    let asset = state
        .registry
        .update_asset(&update, body.is_image_change, &body.asset.asset_image)
        .await?;

    Ok(Json(serde_json::json!({ "data": [asset] })))
}
