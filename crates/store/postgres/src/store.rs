use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::warn;

use stockroom_core::{Asset, AssetUpdate, NewAsset, NewUser, User};
use stockroom_store::error::StoreError;
use stockroom_store::store::RegistryStore;

use crate::config::PostgresConfig;
use crate::migrations;

const ASSET_COLUMNS: &str = "asset_id, user_id, user_asset_state, asset_name, asset_type, \
     asset_description, asset_image_url, asset_serial_number";

const USER_COLUMNS: &str =
    "user_id, first_name, last_name, email, user_image_url, password, verified, created";

type AssetRow = (i64, i64, i32, String, String, String, String, String);
type UserRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    bool,
    DateTime<Utc>,
);

fn asset_from_row(row: AssetRow) -> Asset {
    let (
        asset_id,
        user_id,
        user_asset_state,
        asset_name,
        asset_type,
        asset_description,
        asset_image_url,
        asset_serial_number,
    ) = row;
    Asset {
        asset_id,
        user_id,
        user_asset_state,
        asset_name,
        asset_type,
        asset_description,
        asset_image_url,
        asset_serial_number,
    }
}

fn user_from_row(row: UserRow) -> User {
    let (user_id, first_name, last_name, email, user_image_url, password_hash, verified, created) =
        row;
    User {
        user_id,
        first_name,
        last_name,
        email,
        user_image_url,
        password_hash,
        verified,
        created,
    }
}

/// Build `PgConnectOptions` from a [`PostgresConfig`], applying SSL settings
/// when configured.
pub(crate) fn build_connect_options(
    config: &PostgresConfig,
) -> Result<sqlx::postgres::PgConnectOptions, StoreError> {
    let mut options: sqlx::postgres::PgConnectOptions = config
        .url
        .parse()
        .map_err(|e: sqlx::Error| StoreError::Connection(e.to_string()))?;

    if let Some(ref mode) = config.ssl_mode {
        let ssl_mode = match mode.as_str() {
            "disable" => sqlx::postgres::PgSslMode::Disable,
            "prefer" => sqlx::postgres::PgSslMode::Prefer,
            "require" => sqlx::postgres::PgSslMode::Require,
            "verify-ca" => sqlx::postgres::PgSslMode::VerifyCa,
            "verify-full" => sqlx::postgres::PgSslMode::VerifyFull,
            other => {
                return Err(StoreError::Connection(format!("unknown ssl_mode: {other}")));
            }
        };
        options = options.ssl_mode(ssl_mode);
    }

    if let Some(ref path) = config.ssl_root_cert {
        options = options.ssl_root_cert(path);
    }

    Ok(options)
}

/// `PostgreSQL`-backed implementation of [`RegistryStore`].
///
/// Uses `sqlx::PgPool` for connection pooling; every write runs in its own
/// explicit transaction that commits on success and rolls back on statement
/// failure (sqlx additionally rolls back on drop, which covers unwinds).
pub struct PostgresRegistryStore {
    pool: PgPool,
    config: Arc<PostgresConfig>,
}

impl PostgresRegistryStore {
    /// Create a new `PostgresRegistryStore` from the provided configuration.
    ///
    /// Connects to `PostgreSQL`, creates the connection pool, and runs
    /// migrations to ensure the required tables exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if pool creation fails, or
    /// [`StoreError::Statement`] if migrations fail.
    pub async fn new(config: PostgresConfig) -> Result<Self, StoreError> {
        let connect_options = build_connect_options(&config)?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        migrations::run_migrations(&pool, &config)
            .await
            .map_err(|e| StoreError::Statement(e.to_string()))?;

        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }

    /// Create a `PostgresRegistryStore` from an existing pool and config.
    /// Runs migrations on creation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Statement`] if migrations fail.
    pub async fn from_pool(pool: PgPool, config: PostgresConfig) -> Result<Self, StoreError> {
        migrations::run_migrations(&pool, &config)
            .await
            .map_err(|e| StoreError::Statement(e.to_string()))?;

        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }
}

#[async_trait]
impl RegistryStore for PostgresRegistryStore {
    async fn insert_asset(
        &self,
        user_id: i64,
        new: &NewAsset,
        image_url: &str,
    ) -> Result<Asset, StoreError> {
        let table = self.config.assets_table();
        let query = format!(
            "INSERT INTO {table} (
                user_id,
                user_asset_state,
                asset_name,
                asset_type,
                asset_description,
                asset_image_url,
                asset_serial_number
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ASSET_COLUMNS}"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let row: AssetRow = match sqlx::query_as(&query)
            .bind(user_id)
            .bind(0_i32)
            .bind(&new.asset_name)
            .bind(&new.asset_type)
            .bind(&new.asset_description)
            .bind(image_url)
            .bind(&new.asset_serial_number)
            .fetch_one(&mut *tx)
            .await
        {
            Ok(row) => row,
            Err(e) => {
                rollback(tx).await;
                return Err(StoreError::Statement(e.to_string()));
            }
        };

        tx.commit()
            .await
            .map_err(|e| StoreError::Statement(e.to_string()))?;

        Ok(asset_from_row(row))
    }

    async fn patch_asset_image_url(&self, asset_id: i64, url: &str) -> Result<Asset, StoreError> {
        let table = self.config.assets_table();
        let query = format!(
            "UPDATE {table}
             SET asset_image_url = $1
             WHERE asset_id = $2
             RETURNING {ASSET_COLUMNS}"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let row: Option<AssetRow> = match sqlx::query_as(&query)
            .bind(url)
            .bind(asset_id)
            .fetch_optional(&mut *tx)
            .await
        {
            Ok(row) => row,
            Err(e) => {
                rollback(tx).await;
                return Err(StoreError::Statement(e.to_string()));
            }
        };

        tx.commit()
            .await
            .map_err(|e| StoreError::Statement(e.to_string()))?;

        row.map(asset_from_row)
            .ok_or_else(|| StoreError::RowNotFound(format!("asset {asset_id}")))
    }

    async fn update_asset(&self, update: &AssetUpdate) -> Result<Asset, StoreError> {
        let table = self.config.assets_table();
        let query = format!(
            "UPDATE {table}
             SET user_asset_state = $2,
                 asset_name = $3,
                 asset_type = $4,
                 asset_description = $5,
                 asset_image_url = $6,
                 asset_serial_number = $7
             WHERE asset_id = $1
             RETURNING {ASSET_COLUMNS}"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let row: Option<AssetRow> = match sqlx::query_as(&query)
            .bind(update.asset_id)
            .bind(update.user_asset_state)
            .bind(&update.asset_name)
            .bind(&update.asset_type)
            .bind(&update.asset_description)
            .bind(&update.asset_image_url)
            .bind(&update.asset_serial_number)
            .fetch_optional(&mut *tx)
            .await
        {
            Ok(row) => row,
            Err(e) => {
                rollback(tx).await;
                return Err(StoreError::Statement(e.to_string()));
            }
        };

        tx.commit()
            .await
            .map_err(|e| StoreError::Statement(e.to_string()))?;

        row.map(asset_from_row)
            .ok_or_else(|| StoreError::RowNotFound(format!("asset {}", update.asset_id)))
    }

    async fn assets_for_user(&self, user_id: i64) -> Result<Vec<Asset>, StoreError> {
        let table = self.config.assets_table();
        let query = format!(
            "SELECT {ASSET_COLUMNS} FROM {table} WHERE user_id = $1 ORDER BY asset_id"
        );

        let rows: Vec<AssetRow> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Statement(e.to_string()))?;

        Ok(rows.into_iter().map(asset_from_row).collect())
    }

    async fn asset_by_id(&self, asset_id: i64) -> Result<Option<Asset>, StoreError> {
        let table = self.config.assets_table();
        let query = format!("SELECT {ASSET_COLUMNS} FROM {table} WHERE asset_id = $1");

        let row: Option<AssetRow> = sqlx::query_as(&query)
            .bind(asset_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Statement(e.to_string()))?;

        Ok(row.map(asset_from_row))
    }

    async fn insert_user(&self, new: &NewUser, image_url: &str) -> Result<User, StoreError> {
        let table = self.config.users_table();
        let query = format!(
            "INSERT INTO {table} (
                first_name,
                last_name,
                email,
                user_image_url,
                password
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let row: UserRow = match sqlx::query_as(&query)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .bind(&new.email)
            .bind(image_url)
            .bind(&new.password_hash)
            .fetch_one(&mut *tx)
            .await
        {
            Ok(row) => row,
            Err(e) => {
                rollback(tx).await;
                return Err(StoreError::Statement(e.to_string()));
            }
        };

        tx.commit()
            .await
            .map_err(|e| StoreError::Statement(e.to_string()))?;

        Ok(user_from_row(row))
    }

    async fn patch_user_image_url(&self, user_id: i64, url: &str) -> Result<User, StoreError> {
        let table = self.config.users_table();
        let query = format!(
            "UPDATE {table}
             SET user_image_url = $1
             WHERE user_id = $2
             RETURNING {USER_COLUMNS}"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let row: Option<UserRow> = match sqlx::query_as(&query)
            .bind(url)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
        {
            Ok(row) => row,
            Err(e) => {
                rollback(tx).await;
                return Err(StoreError::Statement(e.to_string()));
            }
        };

        tx.commit()
            .await
            .map_err(|e| StoreError::Statement(e.to_string()))?;

        row.map(user_from_row)
            .ok_or_else(|| StoreError::RowNotFound(format!("user {user_id}")))
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let table = self.config.users_table();
        let query = format!(
            "SELECT {USER_COLUMNS} FROM {table} WHERE email = $1 ORDER BY user_id LIMIT 1"
        );

        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Statement(e.to_string()))?;

        Ok(row.map(user_from_row))
    }
}

/// Explicit rollback; a rollback failure is logged rather than masking the
/// statement error that caused it.
async fn rollback(tx: sqlx::Transaction<'_, sqlx::Postgres>) {
    if let Err(e) = tx.rollback().await {
        warn!(error = %e, "transaction rollback failed");
    }
}

#[cfg(all(test, feature = "integration"))]
mod integration_tests {
    use super::*;

    fn test_config() -> PostgresConfig {
        PostgresConfig {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/stockroom_test".to_string()),
            table_prefix: format!("test_{}_", uuid::Uuid::new_v4().simple()),
            ..PostgresConfig::default()
        }
    }

    #[tokio::test]
    async fn insert_patch_update_roundtrip() {
        let store = PostgresRegistryStore::new(test_config())
            .await
            .expect("pool creation should succeed");

        let user = store
            .insert_user(
                &NewUser {
                    first_name: "Ada".into(),
                    last_name: "Lovelace".into(),
                    email: "ada@example.com".into(),
                    password_hash: "hash".into(),
                },
                stockroom_core::PLACEHOLDER_IMAGE_URL,
            )
            .await
            .expect("user insert should succeed");
        assert!(user.user_id > 0);
        assert!(!user.verified);

        let asset = store
            .insert_asset(
                user.user_id,
                &NewAsset {
                    asset_name: "Watch".into(),
                    asset_type: "wearable".into(),
                    asset_description: String::new(),
                    asset_serial_number: "SN-100".into(),
                },
                stockroom_core::PLACEHOLDER_IMAGE_URL,
            )
            .await
            .expect("asset insert should succeed");
        assert!(asset.asset_id > 0);
        assert_eq!(asset.user_asset_state, 0);

        let url = format!("https://blobs.example/asset_id_{}", asset.asset_id);
        let patched = store
            .patch_asset_image_url(asset.asset_id, &url)
            .await
            .expect("patch should succeed");
        assert_eq!(patched.asset_image_url, url);

        // Patching again with the same value is a no-op on row state.
        let repatched = store
            .patch_asset_image_url(asset.asset_id, &url)
            .await
            .expect("repeat patch should succeed");
        assert_eq!(repatched, patched);

        let listed = store
            .assets_for_user(user.user_id)
            .await
            .expect("listing should succeed");
        assert_eq!(listed.len(), 1);
    }
}
