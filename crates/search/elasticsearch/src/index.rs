use std::time::Duration;

use async_trait::async_trait;

use stockroom_search::document::AssetDocument;
use stockroom_search::error::SearchError;
use stockroom_search::index::SearchIndex;

use crate::config::ElasticsearchConfig;

/// Elasticsearch-backed search index using the REST API via `reqwest`.
///
/// Asset documents are indexed into a single index named by
/// [`ElasticsearchConfig::index`], keyed by asset id so re-indexing an
/// asset replaces its previous document. The index mapping is created
/// automatically on construction if it does not already exist.
pub struct ElasticsearchSearchIndex {
    client: reqwest::Client,
    base_url: String,
    index: String,
    username: Option<String>,
    password: Option<String>,
}

impl ElasticsearchSearchIndex {
    /// Create a new index handle, optionally configured with basic
    /// authentication, and ensure the index exists with its mapping.
    pub async fn new(config: &ElasticsearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SearchError::Index(e.to_string()))?;

        let index = Self {
            client,
            base_url: config.url.trim_end_matches('/').to_owned(),
            index: config.index.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        };

        index.ensure_index().await?;
        Ok(index)
    }

    /// Build a [`reqwest::RequestBuilder`] for the given method and path,
    /// applying basic authentication when credentials are configured.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{path}", self.base_url);
        let mut req = self.client.request(method, &url);
        if let Some(ref user) = self.username {
            req = req.basic_auth(user, self.password.as_deref());
        }
        req
    }

    /// Create the index with keyword mappings if it does not already exist.
    ///
    /// A `400 Bad Request` response containing
    /// `resource_already_exists_exception` is treated as success.
    async fn ensure_index(&self) -> Result<(), SearchError> {
        let mapping = serde_json::json!({
            "mappings": {
                "properties": {
                    "asset_id":            { "type": "keyword" },
                    "user_id":             { "type": "keyword" },
                    "user_asset_state":    { "type": "keyword" },
                    "asset_name":          { "type": "keyword" },
                    "asset_type":          { "type": "keyword" },
                    "asset_description":   { "type": "text" },
                    "asset_image_url":     { "type": "keyword" },
                    "asset_serial_number": { "type": "keyword" }
                }
            }
        });

        let resp = self
            .request(reqwest::Method::PUT, &self.index)
            .json(&mapping)
            .send()
            .await
            .map_err(|e| SearchError::Index(e.to_string()))?;

        // 200/201 = created, 400 with "resource_already_exists_exception" = OK
        if resp.status().is_success() || resp.status() == reqwest::StatusCode::BAD_REQUEST {
            tracing::debug!(index = %self.index, "elasticsearch index ensured");
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(SearchError::Index(format!(
                "failed to create index '{}': {body}",
                self.index
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Elasticsearch response types (internal)
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(serde::Deserialize)]
struct SearchHits {
    hits: Vec<SearchHit>,
}

#[derive(serde::Deserialize)]
struct SearchHit {
    #[serde(rename = "_source")]
    source: AssetDocument,
}

// ---------------------------------------------------------------------------
// SearchIndex implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl SearchIndex for ElasticsearchSearchIndex {
    async fn upsert(&self, document: &AssetDocument) -> Result<(), SearchError> {
        let path = format!("{}/_doc/{}", self.index, document.asset_id);

        let resp = self
            .request(reqwest::Method::PUT, &path)
            .json(document)
            .send()
            .await
            .map_err(|e| SearchError::Index(e.to_string()))?;

        if resp.status().is_success() {
            tracing::debug!(asset_id = %document.asset_id, "asset document indexed");
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(SearchError::Index(format!(
                "failed to index asset document: {body}"
            )))
        }
    }

    async fn search_serial_prefix(
        &self,
        prefix: &str,
        size: usize,
        from: usize,
    ) -> Result<Vec<AssetDocument>, SearchError> {
        let path = format!("{}/_search", self.index);

        let body = serde_json::json!({
            "query": {
                "prefix": { "asset_serial_number": prefix }
            },
            "size": size,
            "from": from
        });

        let resp = self
            .request(reqwest::Method::POST, &path)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Index(e.to_string()))?;

        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(SearchError::Index(format!(
                "serial prefix search failed: {text}"
            )));
        }

        let search: SearchResponse = resp
            .json()
            .await
            .map_err(|e| SearchError::Serialization(e.to_string()))?;

        Ok(search.hits.hits.into_iter().map(|h| h.source).collect())
    }
}
