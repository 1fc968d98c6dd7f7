//! Client code for geoscope.
//!
//! This crate provides the HTTP client for the external WMS
//! feature-lookup service the API proxies and caches.

pub mod wms;

pub use wms::{FeatureInfoRequest, FeatureInfoResponse, WmsClient, WmsConfig, WmsError};
