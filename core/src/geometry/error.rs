use thiserror::Error;

use super::GeometryType;

/// An invariant violated while constructing a geometry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A line string needs at least one point
    #[error("a LineString needs at least one point")]
    EmptyLineString,

    /// A polygon needs at least one ring, the exterior ring
    #[error("a Polygon needs at least one ring, the exterior ring")]
    EmptyPolygon,

    /// The first point of a ring differs from its last point
    #[error("ring {ring} is not closed")]
    UnclosedRing { ring: usize },

    /// The parts of a geometry do not agree on one spatial reference system
    #[error("parts of a geometry must share one SRID, found {srids:?}")]
    MixedSrids { srids: Vec<i32> },

    /// A geometry collection contains a multi geometry or another collection
    #[error("geometry collections must not be nested ({found} at index {index})")]
    NestedCollection { index: usize, found: GeometryType },

    /// A multi geometry or collection without children
    #[error("a {kind} needs at least one element")]
    EmptyCollection { kind: GeometryType },
}
