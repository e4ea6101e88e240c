use std::fmt::Display;

use uuid::Uuid;

use crate::{coordinate::Coordinate, line_string::LineStringLiteral};

/// A named stop of a route. `location` is still encoded, see [`crate::point::extract`].
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub order: i32,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub distance_meters: Option<f64>,
    pub geometry: Option<StoredGeometry>,
}

impl Route {
    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }
}

/// `route_line` as the store hands it back, which depends on how the column is exposed.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredGeometry {
    GeoJson(geojson::Geometry),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryDescription {
    LineString {
        vertices: usize,
        first: Option<Coordinate>,
        last: Option<Coordinate>,
    },
    OtherGeoJson(&'static str),
    Encoded {
        length: usize,
    },
}

impl StoredGeometry {
    pub fn describe(&self) -> GeometryDescription {
        match self {
            StoredGeometry::GeoJson(geometry) => match &geometry.value {
                geojson::Value::LineString(positions) => {
                    let to_coordinate = |p: &Vec<f64>| match p.as_slice() {
                        [lon, lat, ..] => Some(Coordinate::new(*lon, *lat)),
                        _ => None,
                    };
                    GeometryDescription::LineString {
                        vertices: positions.len(),
                        first: positions.first().and_then(to_coordinate),
                        last: positions.last().and_then(to_coordinate),
                    }
                }
                other => GeometryDescription::OtherGeoJson(geojson_type_name(other)),
            },
            StoredGeometry::Text(text) => match LineStringLiteral::parse(text) {
                Ok(line) => GeometryDescription::LineString {
                    vertices: line.len(),
                    first: line.vertices().first().copied(),
                    last: line.vertices().last().copied(),
                },
                Err(_) => GeometryDescription::Encoded {
                    length: text.len(),
                },
            },
        }
    }
}

fn geojson_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

impl Display for GeometryDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryDescription::LineString {
                vertices,
                first,
                last,
            } => {
                write!(f, "LineString with {} vertices", vertices)?;
                if let (Some(first), Some(last)) = (first, last) {
                    write!(
                        f,
                        ", from [{}, {}] to [{}, {}]",
                        first.lon, first.lat, last.lon, last.lat
                    )?;
                }
                Ok(())
            }
            GeometryDescription::OtherGeoJson(kind) => write!(f, "GeoJSON {}", kind),
            GeometryDescription::Encoded { length } => {
                write!(f, "encoded geometry ({} characters)", length)
            }
        }
    }
}
