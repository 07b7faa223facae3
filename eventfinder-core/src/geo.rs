//! Coordinates and map viewport fitting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FinderError, FinderResult};

/// Multiplier applied to the bounding box so markers on the edge keep some
/// surrounding context.
pub const VIEWPORT_PADDING: f64 = 1.5;

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(format!("non-finite coordinate ({latitude}, {longitude})"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {latitude} outside -90..90"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude {longitude} outside -180..180"));
        }
        Ok(Coordinate {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// A map camera viewport: a center point plus the latitude/longitude span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn center(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Whether `point` lies within center ± delta/2 on both axes.
    pub fn contains(&self, point: &Coordinate) -> bool {
        let half_lat = self.latitude_delta / 2.0;
        let half_lng = self.longitude_delta / 2.0;

        (point.latitude - self.latitude).abs() <= half_lat
            && (point.longitude - self.longitude).abs() <= half_lng
    }
}

/// Compute the padded bounding region containing every point.
///
/// Fails with [`FinderError::EmptyViewport`] when `points` is empty. A single
/// point (or a set of identical points) yields zero deltas; clamping to a
/// minimum zoom is left to the renderer.
pub fn fit(points: &[Coordinate]) -> FinderResult<Region> {
    let (first, rest) = points.split_first().ok_or(FinderError::EmptyViewport)?;

    let init = (
        first.latitude,
        first.latitude,
        first.longitude,
        first.longitude,
    );
    let (min_lat, max_lat, min_lng, max_lng) =
        rest.iter().fold(init, |(min_lat, max_lat, min_lng, max_lng), p| {
            (
                min_lat.min(p.latitude),
                max_lat.max(p.latitude),
                min_lng.min(p.longitude),
                max_lng.max(p.longitude),
            )
        });

    Ok(Region {
        latitude: (min_lat + max_lat) / 2.0,
        longitude: (min_lng + max_lng) / 2.0,
        latitude_delta: (max_lat - min_lat) * VIEWPORT_PADDING,
        longitude_delta: (max_lng - min_lng) * VIEWPORT_PADDING,
    })
}
