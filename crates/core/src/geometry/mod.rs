//! Geometry normalization for incoming AOI polygons.
//!
//! User-drawn geometry arrives untrusted: rings may be unclosed, contain
//! thousands of near-collinear vertices, or carry coordinates outside the
//! WGS84 envelope. [`Geometry::normalize`] turns such input into a closed,
//! bounded-complexity shape or rejects it.
//!
//! All operations are pure; nothing here does I/O or retains state
//! between calls.

mod simplify;

use crate::Error;
use serde::{Deserialize, Serialize};

pub use simplify::DEFAULT_TOLERANCE_DEG;

/// A single (longitude, latitude) pair in degrees.
pub type Position = (f64, f64);

/// An ordered coordinate sequence forming one polygon boundary.
///
/// A well-formed ring is closed (first pair equals last pair exactly)
/// and has at least [`MIN_RING_POINTS`] points.
pub type Ring = Vec<Position>;

/// Minimum points in a valid ring: a triangle plus the closing pair.
pub const MIN_RING_POINTS: usize = 4;

/// GeoJSON-shaped geometry accepted from the drawing layer.
///
/// The first ring of a polygon is the outer boundary; subsequent rings
/// are holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

impl Geometry {
    /// Close every ring whose first and last pairs differ by appending a
    /// copy of the first pair. Idempotent; points are untouched.
    pub fn close_rings(&mut self) {
        match self {
            Geometry::Point { .. } => {}
            Geometry::Polygon { coordinates } => {
                coordinates.iter_mut().for_each(close_ring);
            }
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    polygon.iter_mut().for_each(close_ring);
                }
            }
        }
    }

    /// Reduce every ring with Douglas-Peucker at `tolerance_deg` degrees.
    ///
    /// Ring endpoints are fixed anchors and no ring drops below
    /// [`MIN_RING_POINTS`] points; a ring that would is kept unsimplified.
    pub fn simplify(&mut self, tolerance_deg: f64) {
        match self {
            Geometry::Point { .. } => {}
            Geometry::Polygon { coordinates } => {
                for ring in coordinates {
                    *ring = simplify::simplify_ring(ring, tolerance_deg);
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    for ring in polygon {
                        *ring = simplify::simplify_ring(ring, tolerance_deg);
                    }
                }
            }
        }
    }

    /// Whether every coordinate pair lies within [-180,180] x [-90,90].
    pub fn within_bounds(&self) -> bool {
        self.first_out_of_range().is_none()
    }

    /// Full normalization pipeline: close rings, simplify, check bounds.
    ///
    /// The result is what the create-AOI handler persists. Fails with
    /// [`Error::OutOfBounds`] naming the first offending pair.
    pub fn normalize(mut self, tolerance_deg: f64) -> Result<Self, Error> {
        self.close_rings();
        self.simplify(tolerance_deg);
        match self.first_out_of_range() {
            None => Ok(self),
            Some((lng, lat)) => Err(Error::OutOfBounds(format!(
                "coordinate ({lng}, {lat}) outside [-180,180] x [-90,90]"
            ))),
        }
    }

    fn first_out_of_range(&self) -> Option<Position> {
        match self {
            Geometry::Point { coordinates } => (!in_range(*coordinates)).then_some(*coordinates),
            Geometry::Polygon { coordinates } => coordinates
                .iter()
                .flatten()
                .find(|&&pair| !in_range(pair))
                .copied(),
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flatten()
                .flatten()
                .find(|&&pair| !in_range(pair))
                .copied(),
        }
    }
}

fn in_range((lng, lat): Position) -> bool {
    (-180.0..=180.0).contains(&lng) && (-90.0..=90.0).contains(&lat)
}

fn close_ring(ring: &mut Ring) {
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last())
        && first != last
    {
        ring.push(first);
    }
}
