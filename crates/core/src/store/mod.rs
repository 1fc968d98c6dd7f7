//! SQLite-backed persistence for Areas of Interest.
//!
//! Async access goes through tokio-rusqlite, with WAL mode for concurrent
//! readers and a simple versioned migration table. Only normalized
//! geometry should reach this layer; the handlers enforce that.

pub mod aois;
pub mod connection;
pub mod migrations;

pub use crate::Error;

pub use aois::Aoi;
pub use connection::AoiDb;
