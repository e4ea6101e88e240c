use sanpo_core::{Coordinate, PathGeometry, PathSummary};
use serde::Deserialize;

use crate::client::OrsError;

pub const ORS_SUCCESS_STATUS: u16 = 200;

#[derive(Deserialize)]
struct DirectionsResponse {
    // ORS omits `features` entirely when nothing was routed
    #[serde(default)]
    features: Vec<DirectionsFeature>,
}

#[derive(Deserialize)]
struct DirectionsFeature {
    geometry: FeatureGeometry,

    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Deserialize)]
struct FeatureGeometry {
    #[serde(rename = "type")]
    kind: String,

    /// `[lon, lat]` or `[lon, lat, elevation]`
    coordinates: Vec<Vec<f64>>,
}

#[derive(Deserialize, Default)]
struct FeatureProperties {
    #[serde(default)]
    summary: Summary,
}

/// Zero values are left out of the summary by ORS.
#[derive(Deserialize, Default)]
struct Summary {
    #[serde(default)]
    distance: f64,

    #[serde(default)]
    duration: f64,
}

/// Validates a `/v2/directions/{profile}/geojson` response.
pub fn parse_directions_response(status: u16, body: &str) -> Result<PathGeometry, OrsError> {
    if status != ORS_SUCCESS_STATUS {
        return Err(OrsError::Service {
            status,
            body: body.to_string(),
        });
    }

    let response: DirectionsResponse =
        serde_json::from_str(body).map_err(|err| OrsError::Parse(err.to_string()))?;

    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or(OrsError::EmptyRoute)?;

    if feature.geometry.kind != "LineString" {
        return Err(OrsError::Parse(format!(
            "expected a LineString geometry, got {}",
            feature.geometry.kind
        )));
    }

    let positions = feature.geometry.coordinates;
    if positions.len() < 2 {
        return Err(OrsError::EmptyRoute);
    }

    let mut coordinates = Vec::with_capacity(positions.len());
    let mut elevations = Vec::with_capacity(positions.len());
    for (index, position) in positions.iter().enumerate() {
        match position.as_slice() {
            [lon, lat] => coordinates.push(Coordinate::new(*lon, *lat)),
            [lon, lat, elevation, ..] => {
                coordinates.push(Coordinate::new(*lon, *lat));
                elevations.push(*elevation);
            }
            _ => {
                return Err(OrsError::Parse(format!(
                    "position {} has {} values",
                    index,
                    position.len()
                )));
            }
        }
    }

    if elevations.len() != coordinates.len() {
        elevations.clear();
    }

    let summary = PathSummary {
        distance: checked_metric("distance", feature.properties.summary.distance)?,
        duration: checked_metric("duration", feature.properties.summary.duration)?,
    };

    Ok(PathGeometry {
        coordinates,
        elevations,
        summary,
    })
}

fn checked_metric(name: &str, value: f64) -> Result<f64, OrsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(OrsError::Parse(format!("invalid {}: {}", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_POINTS: &str = include_str!("../tests/fixtures/directions_two_points.json");
    const WITH_ELEVATION: &str = include_str!("../tests/fixtures/directions_elevation.json");
    const NO_FEATURES: &str = include_str!("../tests/fixtures/directions_no_features.json");
    const QUOTA_EXCEEDED: &str = include_str!("../tests/fixtures/error_quota.json");

    #[test]
    fn test_parse_two_points() {
        let geometry = parse_directions_response(200, TWO_POINTS).unwrap();

        assert_eq!(
            geometry.coordinates,
            vec![
                Coordinate::new(139.6476, 35.4437),
                Coordinate::new(139.6485, 35.4435)
            ]
        );
        assert!(geometry.elevations.is_empty());
        assert_eq!(geometry.summary.distance, 150.0);
        assert_eq!(geometry.summary.duration, 120.0);
    }

    #[test]
    fn test_parse_keeps_elevation_apart() {
        let geometry = parse_directions_response(200, WITH_ELEVATION).unwrap();

        assert_eq!(geometry.point_count(), 4);
        assert_eq!(geometry.coordinates[1], Coordinate::new(139.647_93, 35.443_67));
        assert_eq!(geometry.elevations, vec![3.0, 3.4, 4.1, 3.8]);
        assert_eq!(geometry.summary.distance, 412.7);
        assert_eq!(geometry.summary.duration, 297.1);
    }

    #[test]
    fn test_no_features_is_empty_route() {
        assert!(matches!(
            parse_directions_response(200, NO_FEATURES),
            Err(OrsError::EmptyRoute)
        ));
        assert!(matches!(
            parse_directions_response(200, "{}"),
            Err(OrsError::EmptyRoute)
        ));
    }

    #[test]
    fn test_empty_coordinates_is_empty_route() {
        let body = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"LineString","coordinates":[]},"properties":{"summary":{}}}]}"#;

        assert!(matches!(
            parse_directions_response(200, body),
            Err(OrsError::EmptyRoute)
        ));
    }

    #[test]
    fn test_missing_summary_values_are_zero() {
        let body = r#"{"features":[{"geometry":{"type":"LineString","coordinates":[[1.0,2.0],[1.0,2.0]]},"properties":{"summary":{}}}]}"#;

        let geometry = parse_directions_response(200, body).unwrap();

        assert_eq!(geometry.summary, PathSummary::default());
    }

    #[test]
    fn test_non_success_status() {
        let err = parse_directions_response(403, QUOTA_EXCEEDED).unwrap_err();

        match err {
            OrsError::Service { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, QUOTA_EXCEEDED);
            }
            other => panic!("unexpected error {other:?}"),
        }

        // only 200 counts as success
        assert!(matches!(
            parse_directions_response(204, TWO_POINTS),
            Err(OrsError::Service { status: 204, .. })
        ));
    }

    #[test]
    fn test_unparseable_body() {
        for body in ["<html>Bad Gateway</html>", "", "null", "\"route\"", r#"{"features":[{"geometry":{}}]}"#] {
            assert!(
                matches!(parse_directions_response(200, body), Err(OrsError::Parse(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn test_invalid_positions_and_metrics() {
        let short_position = r#"{"features":[{"geometry":{"type":"LineString","coordinates":[[1.0],[1.0,2.0]]}}]}"#;
        assert!(matches!(
            parse_directions_response(200, short_position),
            Err(OrsError::Parse(_))
        ));

        let negative = r#"{"features":[{"geometry":{"type":"LineString","coordinates":[[1.0,2.0],[1.0,2.0]]},"properties":{"summary":{"distance":-1.0}}}]}"#;
        assert!(matches!(
            parse_directions_response(200, negative),
            Err(OrsError::Parse(_))
        ));

        let point = r#"{"features":[{"geometry":{"type":"Point","coordinates":[[1.0,2.0],[1.0,2.0]]}}]}"#;
        assert!(matches!(
            parse_directions_response(200, point),
            Err(OrsError::Parse(_))
        ));
    }
}
