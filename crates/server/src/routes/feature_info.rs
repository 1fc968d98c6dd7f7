//! Cached feature lookup handler.
//!
//! The cache probe and the upstream fetch live here, on either side of
//! the cache boundary: only a successful upstream response is stored,
//! and a failed fetch leaves the cache exactly as it was.

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::{AppState, CachedFeature};
use crate::error::ApiError;
use geoscope_client::FeatureInfoRequest;

/// Query parameters for GET /api/feature-info.
#[derive(Debug, Deserialize)]
pub struct FeatureInfoQuery {
    pub x: u32,
    pub y: u32,
    pub bbox: String,
    pub width: u32,
    pub height: u32,
    /// Comma-separated layer names.
    pub layers: String,
}

impl FeatureInfoQuery {
    fn into_request(self) -> FeatureInfoRequest {
        FeatureInfoRequest {
            layers: self.layers.split(',').map(str::to_string).collect(),
            bbox: self.bbox,
            width: self.width,
            height: self.height,
            x: self.x,
            y: self.y,
        }
    }
}

/// GET /api/feature-info
pub async fn feature_info(
    State(state): State<AppState>, Query(query): Query<FeatureInfoQuery>,
) -> Result<Response, ApiError> {
    let request = query.into_request();
    request.validate()?;
    let key = request.fingerprint();

    if let Some(cached) = state.feature_cache.get(&key).await {
        tracing::debug!(key = %key, "feature cache hit");
        return Ok(feature_response(cached));
    }

    let fetched = state.wms.get_feature_info(&request).await?;
    let cached = CachedFeature { content_type: fetched.content_type, body: fetched.body };
    state.feature_cache.put(key, cached.clone()).await;

    tracing::debug!(ms = fetched.fetch_ms, "feature cache miss, fetched upstream");
    Ok(feature_response(cached))
}

fn feature_response(cached: CachedFeature) -> Response {
    let content_type = cached
        .content_type
        .unwrap_or_else(|| "application/json".to_string());
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], cached.body).into_response()
}
