//! Feature-lookup request parameters and validation.

use geoscope_core::feature_fingerprint;
use serde::{Deserialize, Serialize};

/// Parameters for one GetFeatureInfo query against the upstream WMS.
///
/// Pixel coordinates are relative to the rendered map image of
/// `width` x `height`; the bounding box ties that image to geographic
/// space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureInfoRequest {
    /// Queried layer names, in request order.
    pub layers: Vec<String>,

    /// Bounding box as "minx,miny,maxx,maxy" in EPSG:4326.
    pub bbox: String,

    /// Rendered image width in pixels.
    pub width: u32,

    /// Rendered image height in pixels.
    pub height: u32,

    /// Queried pixel column, 0-based from the left edge.
    pub x: u32,

    /// Queried pixel row, 0-based from the top edge.
    pub y: u32,
}

impl FeatureInfoRequest {
    /// Validate the request parameters.
    ///
    /// Returns an error if any parameters are out of range or malformed.
    pub fn validate(&self) -> Result<(), crate::wms::WmsError> {
        use crate::wms::WmsError;

        if self.layers.is_empty() {
            return Err(WmsError::InvalidRequest("layers cannot be empty".to_string()));
        }

        if self.layers.iter().any(|layer| layer.is_empty()) {
            return Err(WmsError::InvalidRequest("layer names cannot be empty".to_string()));
        }

        if self.width == 0 || self.height == 0 {
            return Err(WmsError::InvalidRequest(format!(
                "image dimensions must be positive: {}x{}",
                self.width, self.height
            )));
        }

        if self.x >= self.width || self.y >= self.height {
            return Err(WmsError::InvalidRequest(format!(
                "pixel ({}, {}) outside {}x{} image",
                self.x, self.y, self.width, self.height
            )));
        }

        Self::validate_bbox(&self.bbox)?;

        Ok(())
    }

    /// Validate the bbox string: four comma-separated finite numbers with
    /// min < max on both axes.
    fn validate_bbox(bbox: &str) -> Result<(), crate::wms::WmsError> {
        use crate::wms::WmsError;

        let parts: Vec<f64> = bbox
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| WmsError::InvalidRequest(format!("bbox is not numeric: {bbox}")))?;

        if parts.len() != 4 {
            return Err(WmsError::InvalidRequest(format!(
                "bbox must have 4 components, got {}",
                parts.len()
            )));
        }

        if parts.iter().any(|v| !v.is_finite()) {
            return Err(WmsError::InvalidRequest(format!("bbox is not finite: {bbox}")));
        }

        if parts[0] >= parts[2] || parts[1] >= parts[3] {
            return Err(WmsError::InvalidRequest(format!("bbox min must be below max: {bbox}")));
        }

        Ok(())
    }

    /// Comma-joined layer list, as sent upstream and fingerprinted.
    pub fn layer_list(&self) -> String {
        self.layers.join(",")
    }

    /// Cache key for this request.
    pub fn fingerprint(&self) -> String {
        feature_fingerprint(self.x, self.y, &self.bbox, self.width, self.height, &self.layer_list())
    }
}
