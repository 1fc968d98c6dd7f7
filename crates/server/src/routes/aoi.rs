//! AOI CRUD handlers.
//!
//! Drawn geometry is normalized (rings closed, vertices reduced, bounds
//! checked) before anything reaches the store.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;
use geoscope_core::{Aoi, Error, Geometry};

/// Body for POST /api/aois.
#[derive(Debug, Deserialize)]
pub struct CreateAoiParams {
    pub name: String,
    pub geometry: Geometry,
}

/// POST /api/aois
pub async fn create_aoi(
    State(state): State<AppState>, Json(params): Json<CreateAoiParams>,
) -> Result<(StatusCode, Json<Aoi>), ApiError> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("name cannot be empty".into()).into());
    }

    let geometry = params.geometry.normalize(state.config.simplify_tolerance_deg)?;
    let stored = state.db.insert_aoi(name, &geometry).await?;

    tracing::info!(id = stored.id, name = %stored.name, "aoi created");
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /api/aois
pub async fn list_aois(State(state): State<AppState>) -> Result<Json<Vec<Aoi>>, ApiError> {
    Ok(Json(state.db.list_aois().await?))
}

/// GET /api/aois/{id}
pub async fn get_aoi(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Aoi>, ApiError> {
    let aoi = state
        .db
        .get_aoi(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("aoi {id}")))?;
    Ok(Json(aoi))
}

/// DELETE /api/aois/{id}
pub async fn delete_aoi(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    if state.db.delete_aoi(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound(format!("aoi {id}")).into())
    }
}
