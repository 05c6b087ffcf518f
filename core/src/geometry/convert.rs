//! Conversions into the geometry types of the `geo` crate. The spatial
//! reference identifier is dropped because `geo` geometries do not carry one.

use geo::{coord, Coord};

use super::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

impl From<&Point> for Coord {
    fn from(point: &Point) -> Self {
        coord! { x: point.x(), y: point.y() }
    }
}

impl From<&Point> for geo::Point {
    fn from(point: &Point) -> Self {
        geo::Point::new(point.x(), point.y())
    }
}

impl From<&LineString> for geo::LineString {
    fn from(line_string: &LineString) -> Self {
        line_string.points().iter().map(Coord::<f64>::from).collect()
    }
}

impl From<&Polygon> for geo::Polygon {
    fn from(polygon: &Polygon) -> Self {
        geo::Polygon::new(
            polygon.exterior_ring().into(),
            polygon.interior_rings().iter().map(Into::into).collect(),
        )
    }
}

impl From<&MultiPoint> for geo::MultiPoint {
    fn from(multi_point: &MultiPoint) -> Self {
        geo::MultiPoint(multi_point.points().iter().map(Into::into).collect())
    }
}

impl From<&MultiLineString> for geo::MultiLineString {
    fn from(multi_line_string: &MultiLineString) -> Self {
        geo::MultiLineString(
            multi_line_string
                .line_strings()
                .iter()
                .map(Into::into)
                .collect(),
        )
    }
}

impl From<&MultiPolygon> for geo::MultiPolygon {
    fn from(multi_polygon: &MultiPolygon) -> Self {
        geo::MultiPolygon(multi_polygon.polygons().iter().map(Into::into).collect())
    }
}

impl From<&GeometryCollection> for geo::GeometryCollection {
    fn from(collection: &GeometryCollection) -> Self {
        geo::GeometryCollection(collection.geometries().iter().map(Into::into).collect())
    }
}

impl From<&Geometry> for geo::Geometry {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(g) => geo::Geometry::Point(g.into()),
            Geometry::LineString(g) => geo::Geometry::LineString(g.into()),
            Geometry::Polygon(g) => geo::Geometry::Polygon(g.into()),
            Geometry::MultiPoint(g) => geo::Geometry::MultiPoint(g.into()),
            Geometry::MultiLineString(g) => geo::Geometry::MultiLineString(g.into()),
            Geometry::MultiPolygon(g) => geo::Geometry::MultiPolygon(g.into()),
            Geometry::GeometryCollection(g) => geo::Geometry::GeometryCollection(g.into()),
        }
    }
}
