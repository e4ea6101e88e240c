use std::fmt::Display;

use uuid::Uuid;

use crate::line_string::LineStringLiteral;

pub const ROUTES_TABLE: &str = "official_routes";
pub const ROUTE_LINE_COLUMN: &str = "route_line";
pub const WGS84_SRID: u32 = 4326;

/// `UPDATE ... SET route_line = ST_GeomFromText(...)` for a single route.
///
/// Running the statement twice leaves the row in the same state.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub route_id: Uuid,
    pub line: LineStringLiteral,
}

impl UpdateStatement {
    pub fn new(route_id: Uuid, line: LineStringLiteral) -> Self {
        Self { route_id, line }
    }
}

impl Display for UpdateStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UPDATE {} SET {} = ST_GeomFromText('{}', {}) WHERE id = '{}';",
            ROUTES_TABLE,
            ROUTE_LINE_COLUMN,
            self.line,
            WGS84_SRID,
            self.route_id.hyphenated()
        )
    }
}

/// Statements in the given order, separated by a blank line.
pub fn join_statements(statements: &[UpdateStatement]) -> String {
    statements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}
