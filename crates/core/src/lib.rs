//! Core types and shared functionality for geoscope.
//!
//! This crate provides:
//! - Geometry normalization for incoming AOI polygons
//! - The bounded TTL cache fronting upstream feature lookups
//! - SQLite-backed AOI storage
//! - Configuration structures and unified error types

pub mod cache;
pub mod config;
pub mod error;
pub mod geometry;
pub mod store;

pub use cache::{BoundedCache, feature_fingerprint};
pub use config::AppConfig;
pub use error::Error;
pub use geometry::Geometry;
pub use store::{Aoi, AoiDb};
