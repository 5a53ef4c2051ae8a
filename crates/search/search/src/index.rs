use async_trait::async_trait;

use crate::document::AssetDocument;
use crate::error::SearchError;

/// Trait for the search index mirror.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Insert or replace the document for its asset id (last writer wins).
    async fn upsert(&self, document: &AssetDocument) -> Result<(), SearchError>;

    /// Find documents whose serial number starts with `prefix`, returning
    /// at most `size` documents after skipping `from`.
    async fn search_serial_prefix(
        &self,
        prefix: &str,
        size: usize,
        from: usize,
    ) -> Result<Vec<AssetDocument>, SearchError>;
}
