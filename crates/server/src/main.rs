//! geoscope API server entry point.
//!
//! Boots the HTTP API: loads configuration, opens the AOI store,
//! constructs the feature cache and the WMS client, and runs the
//! periodic cache sweep alongside the axum server.

use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod error;
mod routes;

use geoscope_client::{WmsClient, WmsConfig};
use geoscope_core::{AoiDb, AppConfig, BoundedCache};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = AppConfig::load()?;

    let db = AoiDb::open(&config.db_path).await?;

    let wms = WmsClient::new(WmsConfig {
        base_url: config.wms_base_url.clone(),
        timeout: config.timeout(),
        user_agent: config.user_agent.clone(),
        max_response_bytes: config.max_response_bytes,
    })?;

    let feature_cache = BoundedCache::new(config.cache_ttl(), config.cache_max_entries);

    // Request-triggered sweeps keep the ceiling; this reclaims memory
    // from expired entries during idle stretches.
    let sweep_cache = feature_cache.clone();
    let sweep_period = config.sweep_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_period);
        interval.tick().await;
        loop {
            interval.tick().await;
            sweep_cache.cleanup().await;
        }
    });

    let bind_addr = config.bind_addr.clone();
    let state = routes::AppState { db, feature_cache, wms, config: Arc::new(config) };

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("geoscope API listening on {}", bind_addr);
    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
