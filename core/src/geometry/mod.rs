//! Geometries as stored in a SpatiaLite database
//!
//! All geometry values are immutable. Their constructors check every
//! structural invariant eagerly, so an instance that exists is always valid.
//! Bounding rectangles are derived from the coordinates on demand and never
//! stored.

use std::fmt;

use itertools::Itertools;

pub use self::error::ValidationError;
pub use self::mbr::Mbr;

pub mod convert;
pub mod error;
pub mod mbr;

/// The default spatial reference identifier (WGS 84)
pub const DEFAULT_SRID: i32 = 4326;

/// The kinds of geometries that can be stored. The discriminants are the
/// type codes used in the binary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl GeometryType {
    /// Returns the type code of this geometry type
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Looks up the geometry type with the given type code
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => GeometryType::Point,
            2 => GeometryType::LineString,
            3 => GeometryType::Polygon,
            4 => GeometryType::MultiPoint,
            5 => GeometryType::MultiLineString,
            6 => GeometryType::MultiPolygon,
            7 => GeometryType::GeometryCollection,
            _ => return None,
        })
    }

    /// Returns `true` for multi geometries and geometry collections
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            GeometryType::MultiPoint
                | GeometryType::MultiLineString
                | GeometryType::MultiPolygon
                | GeometryType::GeometryCollection
        )
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        };
        f.write_str(name)
    }
}

/// Implemented by every concrete geometry struct
pub trait GeometryKind {
    /// The type of geometry this struct represents
    const TYPE: GeometryType;
}

/// Returns the single SRID shared by all given values or an error listing
/// the distinct SRIDs found
fn common_srid(srids: impl Iterator<Item = i32>) -> Result<i32, ValidationError> {
    let srids = srids.unique().collect::<Vec<_>>();
    if let [srid] = srids[..] {
        return Ok(srid);
    }
    Err(ValidationError::MixedSrids { srids })
}

/// A point with an X and a Y coordinate. In a geographic coordinate system,
/// X is the longitude and Y the latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    srid: i32,
}

impl Point {
    /// Creates a point in the default spatial reference system
    pub fn new(x: f64, y: f64) -> Self {
        Self::with_srid(x, y, DEFAULT_SRID)
    }

    /// Creates a point in the given spatial reference system
    pub fn with_srid(x: f64, y: f64, srid: i32) -> Self {
        Self { x, y, srid }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn mbr(&self) -> Mbr {
        Mbr::from_point(self.x, self.y, self.srid)
    }
}

/// A sequence of connected points
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    points: Vec<Point>,
    srid: i32,
}

impl LineString {
    /// Creates a line string. Fails if `points` is empty or if the points
    /// do not share one SRID.
    pub fn new(points: Vec<Point>) -> Result<Self, ValidationError> {
        if points.is_empty() {
            return Err(ValidationError::EmptyLineString);
        }
        let srid = common_srid(points.iter().map(Point::srid))?;
        Ok(Self { points, srid })
    }

    pub(crate) fn new_unchecked(points: Vec<Point>, srid: i32) -> Self {
        Self { points, srid }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// Returns `true` if the first point equals the last one
    pub fn is_closed(&self) -> bool {
        self.points.first() == self.points.last()
    }

    pub fn mbr(&self) -> Mbr {
        Mbr::enclosing(self.srid, self.points.iter().map(Point::mbr))
    }
}

/// A polygon consisting of an exterior ring and zero or more holes
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<LineString>,
    srid: i32,
}

impl Polygon {
    /// Creates a polygon. The first ring is the exterior ring, all other
    /// rings are holes. Fails if there are no rings, if a ring is not closed,
    /// or if the rings do not share one SRID.
    ///
    /// This does not check if the rings are simple or if the holes lie
    /// inside the exterior ring.
    pub fn new(rings: Vec<LineString>) -> Result<Self, ValidationError> {
        if rings.is_empty() {
            return Err(ValidationError::EmptyPolygon);
        }
        if let Some(ring) = rings.iter().position(|r| !r.is_closed()) {
            return Err(ValidationError::UnclosedRing { ring });
        }
        let srid = common_srid(rings.iter().map(LineString::srid))?;
        Ok(Self { rings, srid })
    }

    /// Creates a simple polygon without holes
    pub fn from_exterior(exterior_ring: LineString) -> Result<Self, ValidationError> {
        Self::new(vec![exterior_ring])
    }

    pub(crate) fn new_unchecked(rings: Vec<LineString>, srid: i32) -> Self {
        Self { rings, srid }
    }

    pub fn rings(&self) -> &[LineString] {
        &self.rings
    }

    pub fn exterior_ring(&self) -> &LineString {
        &self.rings[0]
    }

    pub fn interior_rings(&self) -> &[LineString] {
        &self.rings[1..]
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// Holes do not contribute to the bounding rectangle
    pub fn mbr(&self) -> Mbr {
        self.exterior_ring().mbr()
    }
}

/// Defines a homogeneous multi geometry
macro_rules! multi_geometry {
    ($(#[$doc:meta])* $name:ident, $item:ident, $items:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $items: Vec<$item>,
            srid: i32,
        }

        impl $name {
            /// Fails if there are no elements or if they do not share one SRID
            pub fn new($items: Vec<$item>) -> Result<Self, ValidationError> {
                if $items.is_empty() {
                    return Err(ValidationError::EmptyCollection {
                        kind: <Self as GeometryKind>::TYPE,
                    });
                }
                let srid = common_srid($items.iter().map($item::srid))?;
                Ok(Self { $items, srid })
            }

            pub fn $items(&self) -> &[$item] {
                &self.$items
            }

            pub fn srid(&self) -> i32 {
                self.srid
            }

            pub fn mbr(&self) -> Mbr {
                Mbr::enclosing(self.srid, self.$items.iter().map($item::mbr))
            }
        }
    };
}

multi_geometry!(
    /// A collection of points
    MultiPoint,
    Point,
    points
);

multi_geometry!(
    /// A collection of line strings
    MultiLineString,
    LineString,
    line_strings
);

multi_geometry!(
    /// A collection of polygons
    MultiPolygon,
    Polygon,
    polygons
);

/// A heterogeneous collection of points, line strings and polygons.
/// Collections cannot be nested.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
    srid: i32,
}

impl GeometryCollection {
    /// Fails if there are no elements, if an element is a multi geometry or
    /// another collection, or if the elements do not share one SRID
    pub fn new(geometries: Vec<Geometry>) -> Result<Self, ValidationError> {
        if geometries.is_empty() {
            return Err(ValidationError::EmptyCollection {
                kind: GeometryType::GeometryCollection,
            });
        }
        if let Some((index, found)) = geometries
            .iter()
            .map(Geometry::geometry_type)
            .find_position(|t| t.is_collection())
        {
            return Err(ValidationError::NestedCollection { index, found });
        }
        let srid = common_srid(geometries.iter().map(Geometry::srid))?;
        Ok(Self { geometries, srid })
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(geometries: Vec<Geometry>, srid: i32) -> Self {
        Self { geometries, srid }
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn mbr(&self) -> Mbr {
        Mbr::enclosing(self.srid, self.geometries.iter().map(Geometry::mbr))
    }
}

/// Any geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// The spatial reference identifier of this geometry
    pub fn srid(&self) -> i32 {
        match self {
            Geometry::Point(g) => g.srid(),
            Geometry::LineString(g) => g.srid(),
            Geometry::Polygon(g) => g.srid(),
            Geometry::MultiPoint(g) => g.srid(),
            Geometry::MultiLineString(g) => g.srid(),
            Geometry::MultiPolygon(g) => g.srid(),
            Geometry::GeometryCollection(g) => g.srid(),
        }
    }

    /// The minimum bounding rectangle of this geometry
    pub fn mbr(&self) -> Mbr {
        match self {
            Geometry::Point(g) => g.mbr(),
            Geometry::LineString(g) => g.mbr(),
            Geometry::Polygon(g) => g.mbr(),
            Geometry::MultiPoint(g) => g.mbr(),
            Geometry::MultiLineString(g) => g.mbr(),
            Geometry::MultiPolygon(g) => g.mbr(),
            Geometry::GeometryCollection(g) => g.mbr(),
        }
    }
}

/// Wires a concrete geometry struct into the [`Geometry`] enum
macro_rules! geometry_variant {
    ($name:ident) => {
        impl GeometryKind for $name {
            const TYPE: GeometryType = GeometryType::$name;
        }

        impl From<$name> for Geometry {
            fn from(value: $name) -> Self {
                Geometry::$name(value)
            }
        }

        /// Gives the geometry back if it is of another type
        impl TryFrom<Geometry> for $name {
            type Error = Geometry;

            fn try_from(value: Geometry) -> Result<Self, Self::Error> {
                match value {
                    Geometry::$name(g) => Ok(g),
                    other => Err(other),
                }
            }
        }
    };
}

geometry_variant!(Point);
geometry_variant!(LineString);
geometry_variant!(Polygon);
geometry_variant!(MultiPoint);
geometry_variant!(MultiLineString);
geometry_variant!(MultiPolygon);
geometry_variant!(GeometryCollection);

#[cfg(test)]
pub(crate) mod tests {
    use assertor::{assert_that, EqualityAssertion, ResultAssertion};
    use pretty_assertions::assert_eq;

    use super::*;

    pub(crate) fn line(coords: &[(f64, f64)]) -> LineString {
        LineString::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    pub(crate) fn polygon(coords: &[(f64, f64)]) -> Polygon {
        Polygon::from_exterior(line(coords)).unwrap()
    }

    pub(crate) const TRIANGLE: [(f64, f64); 4] = [
        (-122.080699, 37.426734),
        (-122.084801, 37.422131),
        (-122.088006, 37.418401),
        (-122.080699, 37.426734),
    ];

    #[test]
    fn point() {
        let point = Point::new(-122.084801, 37.422131);
        assert_that!(point.srid()).is_equal_to(4326);
        assert_that!(point.mbr()).is_equal_to(Mbr::new(
            -122.084801,
            37.422131,
            -122.084801,
            37.422131,
            4326,
        ));
    }

    #[test]
    fn line_string_mbr() {
        let ls = line(&TRIANGLE[..3]);
        let points = ls.points();
        let mbr = ls.mbr();
        assert_that!(mbr.min_x).is_equal_to(points[2].x());
        assert_that!(mbr.min_y).is_equal_to(points[2].y());
        assert_that!(mbr.max_x).is_equal_to(points[0].x());
        assert_that!(mbr.max_y).is_equal_to(points[0].y());
        assert_that!(mbr.srid).is_equal_to(4326);
    }

    #[test]
    fn empty_line_string() {
        assert_eq!(LineString::new(vec![]), Err(ValidationError::EmptyLineString));
    }

    #[test]
    fn line_string_mixed_srids() {
        let result = LineString::new(vec![
            Point::with_srid(1.0, 2.0, 4326),
            Point::with_srid(3.0, 4.0, 3857),
            Point::with_srid(5.0, 6.0, 4326),
        ]);
        assert_eq!(
            result,
            Err(ValidationError::MixedSrids {
                srids: vec![4326, 3857],
            })
        );
    }

    #[test]
    fn polygon_mbr_ignores_holes() {
        let exterior = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]);
        let hole = line(&[(-5.0, -5.0), (20.0, -5.0), (20.0, 20.0), (-5.0, -5.0)]);
        let p = Polygon::new(vec![exterior.clone(), hole]).unwrap();
        assert_that!(p.mbr()).is_equal_to(exterior.mbr());
        assert_that!(p.interior_rings().len()).is_equal_to(1);
    }

    #[test]
    fn unclosed_polygon() {
        let result = Polygon::from_exterior(line(&TRIANGLE[..3]));
        assert_eq!(result, Err(ValidationError::UnclosedRing { ring: 0 }));

        let result = Polygon::new(vec![line(&TRIANGLE), line(&TRIANGLE[1..])]);
        assert_eq!(result, Err(ValidationError::UnclosedRing { ring: 1 }));
    }

    #[test]
    fn empty_polygon() {
        assert_eq!(Polygon::new(vec![]), Err(ValidationError::EmptyPolygon));
    }

    #[test]
    fn multi_polygon_mbr() {
        let a = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let b = polygon(&[(5.0, -3.0), (6.0, -3.0), (6.0, -2.0), (5.0, -3.0)]);
        let mp = MultiPolygon::new(vec![a, b]).unwrap();
        assert_that!(mp.mbr()).is_equal_to(Mbr::new(0.0, -3.0, 6.0, 1.0, 4326));
    }

    #[test]
    fn multi_point_mixed_srids() {
        let result = MultiPoint::new(vec![
            Point::with_srid(1.0, 2.0, 4326),
            Point::with_srid(3.0, 4.0, 3857),
        ]);
        assert_eq!(
            result,
            Err(ValidationError::MixedSrids {
                srids: vec![4326, 3857],
            })
        );
    }

    fn line_with_srid(coords: &[(f64, f64)], srid: i32) -> LineString {
        LineString::new(
            coords
                .iter()
                .map(|&(x, y)| Point::with_srid(x, y, srid))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn polygon_mixed_srids() {
        let exterior = line_with_srid(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)], 4326);
        let hole = line_with_srid(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 1.0)], 3857);
        assert_eq!(
            Polygon::new(vec![exterior, hole]),
            Err(ValidationError::MixedSrids {
                srids: vec![4326, 3857],
            })
        );
    }

    #[test]
    fn multi_line_string_mixed_srids() {
        let result = MultiLineString::new(vec![
            line_with_srid(&TRIANGLE, 4326),
            line_with_srid(&TRIANGLE, 4326),
            line_with_srid(&TRIANGLE, 25832),
        ]);
        assert_eq!(
            result,
            Err(ValidationError::MixedSrids {
                srids: vec![4326, 25832],
            })
        );
    }

    #[test]
    fn multi_polygon_mixed_srids() {
        let a = Polygon::from_exterior(line_with_srid(&TRIANGLE, 3857)).unwrap();
        let b = Polygon::from_exterior(line_with_srid(&TRIANGLE, 4326)).unwrap();
        assert_eq!(
            MultiPolygon::new(vec![a, b]),
            Err(ValidationError::MixedSrids {
                srids: vec![3857, 4326],
            })
        );
    }

    #[test]
    fn empty_multi_line_string() {
        assert_eq!(
            MultiLineString::new(vec![]),
            Err(ValidationError::EmptyCollection {
                kind: GeometryType::MultiLineString,
            })
        );
    }

    #[test]
    fn collection_rejects_nesting() {
        let mut geometries: Vec<Geometry> = vec![
            Point::new(-122.084801, 37.422131).into(),
            line(&TRIANGLE).into(),
            polygon(&TRIANGLE).into(),
        ];
        assert_that!(GeometryCollection::new(geometries.clone())).is_ok();

        geometries.push(MultiPoint::new(vec![Point::new(1.0, 2.0)]).unwrap().into());
        assert_eq!(
            GeometryCollection::new(geometries),
            Err(ValidationError::NestedCollection {
                index: 3,
                found: GeometryType::MultiPoint,
            })
        );
    }

    #[test]
    fn collection_mixed_srids() {
        let result = GeometryCollection::new(vec![
            Point::with_srid(1.0, 2.0, 4326).into(),
            Point::with_srid(1.0, 2.0, 25832).into(),
        ]);
        assert_eq!(
            result,
            Err(ValidationError::MixedSrids {
                srids: vec![4326, 25832],
            })
        );
    }

    #[test]
    fn collection_mbr_and_srid() {
        let gc = GeometryCollection::new(vec![
            Point::with_srid(20.0, 30.0, 3857).into(),
            LineString::new(vec![
                Point::with_srid(-1.0, 5.0, 3857),
                Point::with_srid(2.0, 6.0, 3857),
            ])
            .unwrap()
            .into(),
        ])
        .unwrap();
        let g = Geometry::from(gc);
        assert_that!(g.srid()).is_equal_to(3857);
        assert_that!(g.mbr()).is_equal_to(Mbr::new(-1.0, 5.0, 20.0, 30.0, 3857));
    }

    #[test]
    fn type_codes() {
        for code in 1..=7 {
            let t = GeometryType::from_code(code).unwrap();
            assert_eq!(t.code(), code);
        }
        assert_eq!(GeometryType::from_code(0), None);
        assert_eq!(GeometryType::from_code(8), None);
    }

    #[test]
    fn try_from_geometry() {
        let g = Geometry::from(Point::new(1.0, 2.0));
        assert_eq!(Point::try_from(g.clone()), Ok(Point::new(1.0, 2.0)));
        assert_eq!(LineString::try_from(g.clone()), Err(g));
    }
}
