use sqlx::PgPool;

use crate::config::PostgresConfig;

/// Run database migrations, creating the registry tables if they do not
/// exist.
///
/// # Errors
///
/// Returns a [`sqlx::Error`] if any DDL statement fails.
pub async fn run_migrations(pool: &PgPool, config: &PostgresConfig) -> Result<(), sqlx::Error> {
    let users_table = config.users_table();
    let assets_table = config.assets_table();

    let create_users = format!(
        "CREATE TABLE IF NOT EXISTS {users_table} (
            user_id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            user_image_url TEXT NOT NULL,
            password TEXT NOT NULL,
            verified BOOLEAN NOT NULL DEFAULT FALSE,
            created TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"
    );

    let create_assets = format!(
        "CREATE TABLE IF NOT EXISTS {assets_table} (
            asset_id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL,
            user_asset_state INTEGER NOT NULL DEFAULT 0,
            asset_name TEXT NOT NULL,
            asset_type TEXT NOT NULL,
            asset_description TEXT NOT NULL,
            asset_image_url TEXT NOT NULL,
            asset_serial_number TEXT NOT NULL
        )"
    );

    // Listing assets by owner is the hot read path.
    let create_assets_owner_idx = format!(
        "CREATE INDEX IF NOT EXISTS {}assets_user_id_idx ON {assets_table} (user_id)",
        config.table_prefix
    );

    sqlx::query(&create_users).execute(pool).await?;
    sqlx::query(&create_assets).execute(pool).await?;
    sqlx::query(&create_assets_owner_idx).execute(pool).await?;

    Ok(())
}
