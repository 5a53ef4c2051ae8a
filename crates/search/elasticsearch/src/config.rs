use serde::Deserialize;

/// Configuration for the Elasticsearch search index backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ElasticsearchConfig {
    /// Base URL of the Elasticsearch cluster.
    #[serde(default = "default_url")]
    pub url: String,

    /// Name of the index holding asset documents.
    #[serde(default = "default_index")]
    pub index: String,

    /// Basic auth username, if the cluster requires authentication.
    #[serde(default)]
    pub username: Option<String>,

    /// Basic auth password.
    #[serde(default)]
    pub password: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_url() -> String {
    String::from("http://localhost:9200")
}

fn default_index() -> String {
    String::from("stockroom-assets")
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            index: default_index(),
            username: None,
            password: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_cluster() {
        let config = ElasticsearchConfig::default();
        assert_eq!(config.url, "http://localhost:9200");
        assert_eq!(config.index, "stockroom-assets");
        assert!(config.username.is_none());
        assert_eq!(config.timeout_seconds, 30);
    }
}
