use std::fmt::Display;

use lazy_regex::regex_captures;
use thiserror::Error;

use crate::coordinate::Coordinate;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineStringParseError {
    #[error("not a LINESTRING literal")]
    NotALineString,

    #[error("vertex {index} is invalid: {vertex:?}")]
    InvalidVertex { index: usize, vertex: String },
}

/// WKT `LINESTRING(<lon> <lat>, ...)` over an ordered vertex list.
///
/// Vertices are written with the shortest representation that round-trips,
/// so parsing the literal back yields the exact same coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStringLiteral {
    vertices: Vec<Coordinate>,
}

impl LineStringLiteral {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn parse(literal: &str) -> Result<Self, LineStringParseError> {
        let (_, body) = regex_captures!(
            r"^(?:SRID=\d+;\s*)?LINESTRING\s*\(([^()]*)\)$"i,
            literal.trim()
        )
        .ok_or(LineStringParseError::NotALineString)?;

        let vertices = body
            .split(',')
            .enumerate()
            .map(|(index, vertex)| parse_vertex(vertex).ok_or_else(|| invalid(index, vertex)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { vertices })
    }
}

fn parse_vertex(vertex: &str) -> Option<Coordinate> {
    let mut parts = vertex.split_whitespace();
    let lon = parts.next()?.parse::<f64>().ok()?;
    let lat = parts.next()?.parse::<f64>().ok()?;

    // a third ordinate would be Z, which the pipeline never writes
    if parts.next().is_some() {
        return None;
    }

    Some(Coordinate::new(lon, lat))
}

fn invalid(index: usize, vertex: &str) -> LineStringParseError {
    LineStringParseError::InvalidVertex {
        index,
        vertex: vertex.trim().to_string(),
    }
}

impl Display for LineStringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LINESTRING(")?;
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", vertex.lon, vertex.lat)?;
        }
        write!(f, ")")
    }
}

impl From<&[Coordinate]> for LineStringLiteral {
    fn from(vertices: &[Coordinate]) -> Self {
        Self::new(vertices.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let literal = LineStringLiteral::new(vec![
            Coordinate::new(139.6476, 35.4437),
            Coordinate::new(139.6485, 35.4435),
        ]);

        assert_eq!(
            literal.to_string(),
            "LINESTRING(139.6476 35.4437, 139.6485 35.4435)"
        );
    }

    #[test]
    fn test_parse_reproduces_vertices_exactly() {
        let vertices = vec![
            Coordinate::new(139.647_613_2, 35.443_701_9),
            Coordinate::new(139.648_5, 35.443_5),
            Coordinate::new(-0.1, 51.5),
            Coordinate::new(139.649_000_000_000_01, 35.443),
        ];
        let literal = LineStringLiteral::new(vertices.clone());

        let parsed = LineStringLiteral::parse(&literal.to_string()).unwrap();

        assert_eq!(parsed.vertices(), vertices.as_slice());
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_srid() {
        let parsed =
            LineStringLiteral::parse("SRID=4326;LINESTRING ( 1 2 ,3   4 )\n").unwrap();

        assert_eq!(
            parsed.vertices(),
            &[Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)]
        );
    }

    #[test]
    fn test_parse_rejects_other_geometries() {
        assert_eq!(
            LineStringLiteral::parse("POINT(1 2)"),
            Err(LineStringParseError::NotALineString)
        );
        assert_eq!(
            LineStringLiteral::parse("POLYGON((0 0, 1 0, 1 1, 0 0))"),
            Err(LineStringParseError::NotALineString)
        );
    }

    #[test]
    fn test_parse_rejects_bad_vertex() {
        assert_eq!(
            LineStringLiteral::parse("LINESTRING(1 2, 3)"),
            Err(LineStringParseError::InvalidVertex {
                index: 1,
                vertex: "3".to_string()
            })
        );
        assert!(LineStringLiteral::parse("LINESTRING(1 2 3, 4 5 6)").is_err());
    }
}
