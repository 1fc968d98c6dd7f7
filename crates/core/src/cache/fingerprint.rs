//! Deterministic cache-key generation for feature queries.

use sha2::{Digest, Sha256};

/// Compute the cache key for an upstream feature lookup.
///
/// Order-sensitive over every parameter that affects the upstream
/// response: pixel coordinates, bounding box, image dimensions, and the
/// comma-joined layer list. Identical queries always hash to the same
/// key; changing any single field changes the key.
pub fn feature_fingerprint(x: u32, y: u32, bbox: &str, width: u32, height: u32, layers: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(x.to_string().as_bytes());
    hasher.update(b"\n");
    hasher.update(y.to_string().as_bytes());
    hasher.update(b"\n");
    hasher.update(bbox.as_bytes());
    hasher.update(b"\n");
    hasher.update(width.to_string().as_bytes());
    hasher.update(b"\n");
    hasher.update(height.to_string().as_bytes());
    hasher.update(b"\n");
    hasher.update(layers.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BBOX: &str = "-10.0,40.0,-9.0,41.0";

    #[test]
    fn test_fingerprint_stability() {
        let a = feature_fingerprint(128, 256, BBOX, 512, 512, "parcels,roads");
        let b = feature_fingerprint(128, 256, BBOX, 512, 512, "parcels,roads");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_sensitive_to_each_field() {
        let base = feature_fingerprint(128, 256, BBOX, 512, 512, "parcels");
        assert_ne!(base, feature_fingerprint(129, 256, BBOX, 512, 512, "parcels"));
        assert_ne!(base, feature_fingerprint(128, 257, BBOX, 512, 512, "parcels"));
        assert_ne!(base, feature_fingerprint(128, 256, "-10.0,40.0,-9.0,41.5", 512, 512, "parcels"));
        assert_ne!(base, feature_fingerprint(128, 256, BBOX, 513, 512, "parcels"));
        assert_ne!(base, feature_fingerprint(128, 256, BBOX, 512, 513, "parcels"));
        assert_ne!(base, feature_fingerprint(128, 256, BBOX, 512, 512, "roads"));
    }

    #[test]
    fn test_fingerprint_order_sensitive_layers() {
        let a = feature_fingerprint(0, 0, BBOX, 256, 256, "parcels,roads");
        let b = feature_fingerprint(0, 0, BBOX, 256, 256, "roads,parcels");
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_format() {
        let key = feature_fingerprint(0, 0, BBOX, 256, 256, "parcels");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
