//! In-memory object store backend, suitable for tests and local runs.

use async_trait::async_trait;
use dashmap::DashMap;

use stockroom_blob::error::BlobError;
use stockroom_blob::store::BlobStore;

/// An uploaded object as recorded by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-memory [`BlobStore`] keyed by `bucket/key`. Re-uploads under the
/// same key overwrite prior content.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: DashMap<String, StoredObject>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn object_key(bucket: &str, key: &str) -> String {
        format!("{bucket}/{key}")
    }

    /// Number of distinct objects currently stored.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Fetch a stored object by bucket and key.
    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .get(&Self::object_key(bucket, key))
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        self.objects.insert(
            Self::object_key(bucket, key),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("memory://{bucket}/{key}"))
    }
}
