use geojson::{Geometry, Value};

use crate::{coordinate::Coordinate, line_string::LineStringLiteral};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathSummary {
    /// Meters
    pub distance: f64,

    /// Seconds
    pub duration: f64,
}

impl PathSummary {
    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.duration / 60.0).round() as i64
    }
}

/// A walkable path as returned by the routing service.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGeometry {
    pub coordinates: Vec<Coordinate>,

    /// One value per coordinate, or empty when the service did not return elevation.
    pub elevations: Vec<f64>,

    pub summary: PathSummary,
}

impl PathGeometry {
    pub fn point_count(&self) -> usize {
        self.coordinates.len()
    }

    pub fn line_string(&self) -> LineStringLiteral {
        LineStringLiteral::from(self.coordinates.as_slice())
    }

    /// Total climb in meters, summed over every rising segment. `None` without elevation data.
    pub fn ascent(&self) -> Option<f64> {
        if self.elevations.is_empty() {
            return None;
        }

        Some(
            self.elevations
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).max(0.0))
                .sum(),
        )
    }

    /// GeoJSON LineString with `[lon, lat]` positions.
    pub fn to_geojson(&self) -> Geometry {
        Geometry::new(Value::LineString(
            self.coordinates.iter().map(Coordinate::position).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_units() {
        let summary = PathSummary {
            distance: 150.0,
            duration: 120.0,
        };

        assert_eq!(format!("{:.2}", summary.distance_km()), "0.15");
        assert_eq!(summary.duration_minutes(), 2);

        let summary = PathSummary {
            distance: 4321.0,
            duration: 89.0,
        };
        assert_eq!(format!("{:.2}", summary.distance_km()), "4.32");
        assert_eq!(summary.duration_minutes(), 1);
    }

    #[test]
    fn test_to_geojson_drops_elevation() {
        let geometry = PathGeometry {
            coordinates: vec![
                Coordinate::new(139.6476, 35.4437),
                Coordinate::new(139.6485, 35.4435),
            ],
            elevations: vec![3.2, 4.1],
            summary: PathSummary::default(),
        };

        let json = serde_json::to_value(geometry.to_geojson()).unwrap();

        assert_eq!(json["type"], "LineString");
        assert_eq!(
            json["coordinates"],
            serde_json::json!([[139.6476, 35.4437], [139.6485, 35.4435]])
        );
    }

    #[test]
    fn test_ascent() {
        let mut geometry = PathGeometry {
            coordinates: vec![
                Coordinate::new(139.6476, 35.4437),
                Coordinate::new(139.64793, 35.44367),
                Coordinate::new(139.64821, 35.44359),
                Coordinate::new(139.6485, 35.4435),
            ],
            elevations: vec![3.0, 3.4, 4.1, 3.8],
            summary: PathSummary::default(),
        };

        assert!((geometry.ascent().unwrap() - 1.1).abs() < 1e-9);

        geometry.elevations.clear();
        assert_eq!(geometry.ascent(), None);
    }
}
