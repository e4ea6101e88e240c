pub mod coordinate;
pub mod line_string;
pub mod path_geometry;
pub mod point;
pub mod route;
pub mod statement;

pub use coordinate::Coordinate;
pub use line_string::{LineStringLiteral, LineStringParseError};
pub use path_geometry::{PathGeometry, PathSummary};
pub use point::{MalformedPointError, PointEncoding, PointErrorReason, extract};
pub use route::{GeometryDescription, Route, StoredGeometry, Waypoint};
pub use statement::{UpdateStatement, join_statements};
