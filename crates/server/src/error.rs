//! Structured errors for the geoscope API.
//!
//! Core and client errors are folded into one HTTP-facing type here;
//! handlers only ever return `ApiError`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geoscope_client::WmsError;
use geoscope_core::Error;

/// Error surfaced to API clients as a JSON body with a status code.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::OutOfBounds(_) | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidGeometry(_) | Error::Database(_) | Error::MigrationFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<WmsError> for ApiError {
    fn from(err: WmsError) -> Self {
        let status = match &err {
            WmsError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            WmsError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            WmsError::InvalidBaseUrl(_)
            | WmsError::Network(_)
            | WmsError::HttpError { .. }
            | WmsError::TooLarge { .. } => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!(status = %self.status, message = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_maps_to_400() {
        let err: ApiError = Error::OutOfBounds("coordinate (200, 10)".into()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("OUT_OF_BOUNDS"));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err: ApiError = Error::NotFound("aoi 7".into()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_wms_timeout_maps_to_504() {
        let err: ApiError = WmsError::Timeout.into();
        assert_eq!(err.status, StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_wms_http_error_maps_to_502() {
        let err: ApiError = WmsError::HttpError { status: 500 }.into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_wms_invalid_request_maps_to_400() {
        let err: ApiError = WmsError::InvalidRequest("layers cannot be empty".into()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
