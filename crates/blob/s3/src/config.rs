use serde::Deserialize;

/// Configuration for the S3 object store backend.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    /// AWS region for the buckets.
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint URL override for local development (e.g. `LocalStack`,
    /// MinIO). When set, retrieval URLs are path-style under this endpoint.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

fn default_region() -> String {
    String::from("us-east-1")
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
        }
    }
}

impl S3Config {
    /// Create a new `S3Config` with the given AWS region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
        }
    }

    /// Set the endpoint URL override (for `LocalStack`/MinIO).
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_new_sets_region() {
        let config = S3Config::new("us-west-2");
        assert_eq!(config.region, "us-west-2");
        assert!(config.endpoint_url.is_none());
    }

    #[test]
    fn config_with_endpoint() {
        let config = S3Config::new("us-east-1").with_endpoint_url("http://localhost:4566");
        assert_eq!(
            config.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
    }
}
