use serde::{Deserialize, Serialize};

pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;

/// A WGS-84 position, longitude first.
///
/// Longitude-first is the ordering of the routing service and of WKT vertices.
/// Converting to anything latitude-first must go through an explicit method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    pub fn lon_in_range(&self) -> bool {
        (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.lon)
    }

    pub fn lat_in_range(&self) -> bool {
        (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.lat)
    }

    /// `[lon, lat]`, the GeoJSON position layout.
    pub fn position(&self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }
}

impl From<&Coordinate> for geo_types::Point {
    fn from(coordinate: &Coordinate) -> Self {
        geo_types::Point::new(coordinate.lon, coordinate.lat)
    }
}

impl From<geo_types::Point> for Coordinate {
    fn from(point: geo_types::Point) -> Self {
        Coordinate::new(point.x(), point.y())
    }
}
