//! WMS GetFeatureInfo client.
//!
//! Wraps the external WMS server that answers "what features are under
//! this pixel" queries. The server proxies map-client lookups through
//! here on every cache miss.
//!
//! ### Specification
//!
//! - **Request**: WMS 1.1.1 `GetFeatureInfo` over GET, `SRS=EPSG:4326`,
//!   `INFO_FORMAT=application/json`.
//! - **Validation**: parameters are checked before any network call.
//! - **Limits**: request timeout and a response byte ceiling; oversized
//!   responses are rejected, not truncated.
//! - **Passthrough**: the response body is relayed as opaque bytes.

pub mod error;
pub mod request;
pub mod response;

pub use error::WmsError;
pub use request::FeatureInfoRequest;
pub use response::FeatureInfoResponse;

use reqwest::header;
use std::time::{Duration, Instant};
use url::Url;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "geoscope/0.1";

/// Default response byte ceiling (2MB).
const DEFAULT_MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024;

/// Features requested per lookup.
const FEATURE_COUNT: &str = "50";

/// WMS client configuration.
#[derive(Debug, Clone)]
pub struct WmsConfig {
    /// Base URL of the WMS endpoint.
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
    /// Maximum accepted response size in bytes (default: 2MB).
    pub max_response_bytes: usize,
}

impl Default for WmsConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

/// Client for the upstream WMS feature-lookup service.
#[derive(Debug, Clone)]
pub struct WmsClient {
    http: reqwest::Client,
    base_url: Url,
    config: WmsConfig,
}

impl WmsClient {
    /// Create a new WMS client with the given configuration.
    pub fn new(config: WmsConfig) -> Result<Self, WmsError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| WmsError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .build()
            .map_err(|e| WmsError::Network(std::sync::Arc::new(e)))?;

        Ok(Self { http, base_url, config })
    }

    /// Execute a feature lookup.
    ///
    /// Validates the request, performs the GET, and enforces the response
    /// byte ceiling. Never retries; the caller owns retry policy.
    pub async fn get_feature_info(&self, req: &FeatureInfoRequest) -> Result<FeatureInfoResponse, WmsError> {
        req.validate()?;

        let start = Instant::now();
        let layers = req.layer_list();

        tracing::debug!("feature lookup: layers={} pixel=({},{})", layers, req.x, req.y);

        let response = self
            .http
            .get(self.base_url.clone())
            .query(&[
                ("SERVICE", "WMS"),
                ("VERSION", "1.1.1"),
                ("REQUEST", "GetFeatureInfo"),
                ("LAYERS", layers.as_str()),
                ("QUERY_LAYERS", layers.as_str()),
                ("STYLES", ""),
                ("SRS", "EPSG:4326"),
                ("BBOX", req.bbox.as_str()),
                ("WIDTH", req.width.to_string().as_str()),
                ("HEIGHT", req.height.to_string().as_str()),
                ("X", req.x.to_string().as_str()),
                ("Y", req.y.to_string().as_str()),
                ("INFO_FORMAT", "application/json"),
                ("FEATURE_COUNT", FEATURE_COUNT),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WmsError::HttpError { status: status.as_u16() });
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_response_bytes
        {
            return Err(WmsError::TooLarge { size: len as usize, limit: self.config.max_response_bytes });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.bytes().await?;
        if body.len() > self.config.max_response_bytes {
            return Err(WmsError::TooLarge { size: body.len(), limit: self.config.max_response_bytes });
        }

        let fetch_ms = start.elapsed().as_millis() as u64;
        tracing::debug!("feature lookup done in {}ms ({} bytes)", fetch_ms, body.len());

        Ok(FeatureInfoResponse { status, content_type, body, fetch_ms })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &WmsConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = WmsConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, "geoscope/0.1");
        assert_eq!(config.max_response_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_client_new() {
        let config = WmsConfig { base_url: "http://localhost:8600/wms".to_string(), ..Default::default() };
        assert!(WmsClient::new(config).is_ok());
    }

    #[test]
    fn test_client_new_invalid_base_url() {
        let config = WmsConfig { base_url: "not a url".to_string(), ..Default::default() };
        let result = WmsClient::new(config);
        assert!(matches!(result, Err(WmsError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn test_invalid_request_fails_before_network() {
        // Unroutable base URL: validation must reject first.
        let config = WmsConfig { base_url: "http://192.0.2.1:9/wms".to_string(), ..Default::default() };
        let client = WmsClient::new(config).unwrap();

        let req = FeatureInfoRequest {
            layers: vec![],
            bbox: "0,0,1,1".to_string(),
            width: 256,
            height: 256,
            x: 0,
            y: 0,
        };
        let result = client.get_feature_info(&req).await;
        assert!(matches!(result, Err(WmsError::InvalidRequest(_))));
    }
}
