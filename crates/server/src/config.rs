use std::path::Path;

use serde::Deserialize;

use stockroom_search_elasticsearch::ElasticsearchConfig;
use stockroom_store_postgres::PostgresConfig;

use crate::error::ServerError;

/// Top-level configuration for the Stockroom server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct StockroomConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Relational store configuration.
    #[serde(default)]
    pub store: PostgresConfig,
    /// Object store configuration.
    #[serde(default)]
    pub blob: BlobConfig,
    /// Search index configuration.
    #[serde(default)]
    pub search: ElasticsearchConfig,
    /// Token issuance configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl StockroomConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|e| ServerError::Config(format!("cannot parse {}: {e}", path.display())))
    }
}

/// HTTP server bind configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

/// Object store configuration: the S3 connection plus the two logical
/// bucket names, one per entity kind.
#[derive(Debug, Deserialize)]
pub struct BlobConfig {
    #[serde(default)]
    pub s3: stockroom_blob_s3::S3Config,
    #[serde(default = "default_assets_bucket")]
    pub assets_bucket: String,
    #[serde(default = "default_users_bucket")]
    pub users_bucket: String,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            s3: stockroom_blob_s3::S3Config::default(),
            assets_bucket: default_assets_bucket(),
            users_bucket: default_users_bucket(),
        }
    }
}

fn default_assets_bucket() -> String {
    "asset-registry-assets".to_owned()
}

fn default_users_bucket() -> String {
    "asset-registry-users".to_owned()
}

/// Token issuance configuration.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Secret for signing tokens. Falls back to the `STOCKROOM_JWT_SECRET`
    /// environment variable when unset.
    pub jwt_secret: Option<String>,
    /// Token lifetime in seconds.
    #[serde(default = "default_jwt_expiry")]
    pub jwt_expiry_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_expiry_seconds: default_jwt_expiry(),
        }
    }
}

fn default_jwt_expiry() -> u64 {
    86_400
}

impl AuthConfig {
    /// Resolve the signing secret from config or environment.
    pub fn resolve_secret(&self) -> Result<String, ServerError> {
        if let Some(secret) = &self.jwt_secret {
            return Ok(secret.clone());
        }
        std::env::var("STOCKROOM_JWT_SECRET").map_err(|_| {
            ServerError::Config(
                "no JWT secret: set [auth].jwt_secret or STOCKROOM_JWT_SECRET".to_owned(),
            )
        })
    }
}
