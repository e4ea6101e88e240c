use sanpo_core::{Route, StoredGeometry, Waypoint};
use serde::Deserialize;
use uuid::Uuid;

pub const ROUTE_COLUMNS: &str = "id,name,distance_meters,route_line";
pub const WAYPOINT_COLUMNS: &str = "spot_order,name,location";

/// A row of `official_routes`.
#[derive(Debug, Deserialize)]
pub struct RouteRow {
    pub id: Uuid,
    pub name: String,

    #[serde(default)]
    pub distance_meters: Option<f64>,

    /// GeoJSON object, WKT or hex EWKB depending on how the column is exposed
    #[serde(default)]
    pub route_line: Option<serde_json::Value>,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        let geometry = row.route_line.and_then(|value| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(StoredGeometry::Text(text)),
            other => Some(
                serde_json::from_value::<geojson::Geometry>(other.clone())
                    .map(StoredGeometry::GeoJson)
                    .unwrap_or_else(|_| StoredGeometry::Text(other.to_string())),
            ),
        });

        Route {
            id: row.id,
            name: row.name,
            distance_meters: row.distance_meters,
            geometry,
        }
    }
}

/// A row of `route_spots`.
#[derive(Debug, Deserialize)]
pub struct WaypointRow {
    pub spot_order: i32,
    pub name: String,

    #[serde(default)]
    pub location: Option<String>,
}

impl From<WaypointRow> for Waypoint {
    fn from(row: WaypointRow) -> Self {
        Waypoint {
            order: row.spot_order,
            name: row.name,
            // an empty location is rejected when the point is decoded
            location: row.location.unwrap_or_default(),
        }
    }
}
