use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use stockroom_search::document::AssetDocument;

use super::AppState;
use crate::error::ServerError;

#[derive(Deserialize)]
pub struct SearchQuery {
    /// Serial-number prefix to match.
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default)]
    pub from: usize,
}

fn default_size() -> usize {
    10
}

/// `GET /search?q=prefix` -- serial-number prefix search over the index
/// mirror. Returns a bare array of documents; order is engine-defined.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<AssetDocument>>, ServerError> {
    let hits = state
        .registry
        .search_serials(&query.q, query.size, query.from)
        .await?;
    Ok(Json(hits))
}
