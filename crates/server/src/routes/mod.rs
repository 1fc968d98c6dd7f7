//! HTTP routes and shared application state.

pub mod aoi;
pub mod feature_info;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use bytes::Bytes;
use geoscope_client::WmsClient;
use geoscope_core::{AoiDb, AppConfig, BoundedCache};

/// One cached upstream feature response.
///
/// The body is a `Bytes` handle, so cache hits clone a refcount, not the
/// payload.
#[derive(Debug, Clone)]
pub struct CachedFeature {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Shared state injected into every handler.
///
/// Constructed once at startup and passed through `with_state`; each
/// field is a cheap-to-clone handle, and tests build isolated instances.
#[derive(Clone)]
pub struct AppState {
    pub db: AoiDb,
    pub feature_cache: BoundedCache<CachedFeature>,
    pub wms: WmsClient,
    pub config: Arc<AppConfig>,
}

/// Build the API router over the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/aois", post(aoi::create_aoi).get(aoi::list_aois))
        .route("/api/aois/{id}", get(aoi::get_aoi).delete(aoi::delete_aoi))
        .route("/api/feature-info", get(feature_info::feature_info))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
