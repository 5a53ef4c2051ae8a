use async_trait::async_trait;

use crate::error::BlobError;

/// Trait for the object store gateway.
///
/// Keys follow the `<kind>_<id>` convention (`asset_id_42`, `user_id_7`)
/// and are deterministic and collision-free per entity; a re-upload under
/// the same key overwrites prior content (last writer wins, no versioning).
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a byte blob under `key` in `bucket` with the given content
    /// type, returning a durable retrieval URL.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError>;
}
