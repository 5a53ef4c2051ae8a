//! In-memory search index backend, suitable for tests and local runs.

use async_trait::async_trait;
use dashmap::DashMap;

use stockroom_search::document::AssetDocument;
use stockroom_search::error::SearchError;
use stockroom_search::index::SearchIndex;

/// In-memory [`SearchIndex`] keyed by asset id. Prefix search scans all
/// documents; result order is unspecified.
#[derive(Debug, Default)]
pub struct MemorySearchIndex {
    documents: DashMap<String, AssetDocument>,
}

impl MemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently indexed.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Fetch the indexed document for an asset id.
    pub fn get(&self, asset_id: &str) -> Option<AssetDocument> {
        self.documents.get(asset_id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl SearchIndex for MemorySearchIndex {
    async fn upsert(&self, document: &AssetDocument) -> Result<(), SearchError> {
        self.documents
            .insert(document.asset_id.clone(), document.clone());
        Ok(())
    }

    async fn search_serial_prefix(
        &self,
        prefix: &str,
        size: usize,
        from: usize,
    ) -> Result<Vec<AssetDocument>, SearchError> {
        Ok(self
            .documents
            .iter()
            .filter(|entry| entry.value().asset_serial_number.starts_with(prefix))
            .map(|entry| entry.value().clone())
            .skip(from)
            .take(size)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(id: i64, serial: &str) -> AssetDocument {
        AssetDocument {
            asset_id: id.to_string(),
            user_id: "1".to_string(),
            user_asset_state: "0".to_string(),
            asset_name: format!("asset {id}"),
            asset_type: "tool".to_string(),
            asset_description: String::new(),
            asset_image_url: String::new(),
            asset_serial_number: serial.to_string(),
        }
    }

    #[tokio::test]
    async fn upsert_replaces_document_for_same_asset() {
        let index = MemorySearchIndex::new();
        index.upsert(&document(1, "SN-1000")).await.unwrap();
        index.upsert(&document(1, "SN-9999")).await.unwrap();

        assert_eq!(index.document_count(), 1);
        assert_eq!(index.get("1").unwrap().asset_serial_number, "SN-9999");
    }

    #[tokio::test]
    async fn prefix_search_filters_by_serial() {
        let index = MemorySearchIndex::new();
        index.upsert(&document(1, "SN-1000")).await.unwrap();
        index.upsert(&document(2, "SN-2000")).await.unwrap();
        index.upsert(&document(3, "XX-3000")).await.unwrap();

        let hits = index.search_serial_prefix("SN-", 10, 0).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|d| d.asset_serial_number.starts_with("SN-")));
    }

    #[tokio::test]
    async fn prefix_search_honors_size_and_from() {
        let index = MemorySearchIndex::new();
        for id in 1..=5 {
            index.upsert(&document(id, &format!("SN-{id}"))).await.unwrap();
        }

        let first = index.search_serial_prefix("SN-", 2, 0).await.unwrap();
        assert_eq!(first.len(), 2);

        let rest = index.search_serial_prefix("SN-", 10, 2).await.unwrap();
        assert_eq!(rest.len(), 3);
    }

    #[tokio::test]
    async fn empty_prefix_matches_everything() {
        let index = MemorySearchIndex::new();
        index.upsert(&document(1, "SN-1000")).await.unwrap();
        index.upsert(&document(2, "XX-2000")).await.unwrap();

        let hits = index.search_serial_prefix("", 10, 0).await.unwrap();
        assert_eq!(hits.len(), 2);
    }
}
