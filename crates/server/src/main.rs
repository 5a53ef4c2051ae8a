use std::sync::Arc;

use clap::Parser;
use tracing::info;

use stockroom_blob_s3::S3BlobStore;
use stockroom_pipeline::Registry;
use stockroom_search_elasticsearch::ElasticsearchSearchIndex;
use stockroom_server::api::{self, AppState};
use stockroom_server::auth::JwtManager;
use stockroom_server::config::StockroomConfig;
use stockroom_server::telemetry;
use stockroom_store_postgres::PostgresRegistryStore;

/// Stockroom asset registry HTTP server.
#[derive(Parser, Debug)]
#[command(name = "stockroom-server", about = "HTTP server for the Stockroom asset registry")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "stockroom.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    let cli = Cli::parse();
    let mut config = StockroomConfig::load(&cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let secret = config.auth.resolve_secret()?;
    let jwt = Arc::new(JwtManager::new(&secret, config.auth.jwt_expiry_seconds));

    let store = PostgresRegistryStore::new(config.store.clone()).await?;
    info!(url = %config.store.url, "relational store ready");

    let blobs = S3BlobStore::new(config.blob.s3.clone()).await;
    info!(region = %config.blob.s3.region, "object store client ready");

    let index = ElasticsearchSearchIndex::new(&config.search).await?;
    info!(index = %config.search.index, "search index ready");

    let registry = Registry::builder(Arc::new(store), Arc::new(blobs), Arc::new(index))
        .assets_bucket(config.blob.assets_bucket.clone())
        .users_bucket(config.blob.users_bucket.clone())
        .build();

    let state = AppState {
        registry: Arc::new(registry),
        jwt,
    };
    let router = api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "stockroom server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("stockroom server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
