use async_trait::async_trait;
use tracing::{debug, info};

use stockroom_blob::error::BlobError;
use stockroom_blob::store::BlobStore;

use crate::config::S3Config;

/// AWS S3 implementation of [`BlobStore`].
pub struct S3BlobStore {
    config: S3Config,
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3BlobStore")
            .field("config", &self.config)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3BlobStore {
    /// Create a new `S3BlobStore` by building an AWS SDK client.
    ///
    /// Uses the standard AWS SDK environment credential chain, with an
    /// optional endpoint override for local development.
    pub async fn new(config: S3Config) -> Self {
        let mut loader =
            aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            debug!(endpoint = %endpoint, "using custom S3 endpoint");
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let client = aws_sdk_s3::Client::new(&sdk_config);
        Self { config, client }
    }

    /// Create an `S3BlobStore` with a pre-built client (for testing).
    pub fn with_client(config: S3Config, client: aws_sdk_s3::Client) -> Self {
        Self { config, client }
    }

    /// Durable retrieval URL for an uploaded object.
    ///
    /// `put_object` returns no location, so the URL is computed: the
    /// virtual-hosted-style AWS URL, or path-style under a configured
    /// endpoint override.
    fn location_url(&self, bucket: &str, key: &str) -> String {
        match &self.config.endpoint_url {
            Some(endpoint) => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
            None => format!(
                "https://{bucket}.s3.{}.amazonaws.com/{key}",
                self.config.region
            ),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        debug!(bucket = %bucket, key = %key, size = bytes.len(), "uploading object to S3");

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| BlobError::Upload(e.to_string()))?;

        let url = self.location_url(bucket, key);
        info!(bucket = %bucket, key = %key, url = %url, "S3 object uploaded");
        Ok(url)
    }
}
