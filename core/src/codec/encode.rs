use super::{
    error::EncodeError, writer::BlobWriter, COUNT_LEN, END_MARKER, ENTITY_MARKER,
    ENTITY_PREFIX_LEN, HEADER_LEN, LITTLE_ENDIAN, MBR_END_MARKER, POINT_LEN, START_MARKER,
};
use crate::geometry::{Geometry, GeometryCollection, GeometryType, LineString, Point, Polygon};

/// Computes the exact number of bytes [`encode`] produces for `geometry`
pub fn encoded_len(geometry: &Geometry) -> usize {
    HEADER_LEN + body_len(geometry) + 1
}

fn body_len(geometry: &Geometry) -> usize {
    match geometry {
        Geometry::Point(_) => POINT_LEN,
        Geometry::LineString(g) => line_string_len(g),
        Geometry::Polygon(g) => polygon_len(g),
        Geometry::MultiPoint(g) => members_len(g.points().iter().map(|_| POINT_LEN)),
        Geometry::MultiLineString(g) => members_len(g.line_strings().iter().map(line_string_len)),
        Geometry::MultiPolygon(g) => members_len(g.polygons().iter().map(polygon_len)),
        Geometry::GeometryCollection(g) => members_len(g.geometries().iter().map(body_len)),
    }
}

fn line_string_len(line_string: &LineString) -> usize {
    COUNT_LEN + POINT_LEN * line_string.points().len()
}

fn polygon_len(polygon: &Polygon) -> usize {
    COUNT_LEN + polygon.rings().iter().map(line_string_len).sum::<usize>()
}

fn members_len(body_lens: impl Iterator<Item = usize>) -> usize {
    COUNT_LEN + body_lens.map(|len| ENTITY_PREFIX_LEN + len).sum::<usize>()
}

/// Encodes a geometry into a SpatiaLite blob. The result is always
/// little-endian.
///
/// ```rust
/// use spatia_core::{codec, geometry::Point};
///
/// let blob = codec::encode(&Point::new(1.0, 2.0).into()).unwrap();
/// assert_eq!(blob.len(), 60);
/// assert_eq!(&blob[..2], &[0x00, 0x01]);
/// assert_eq!(blob[38], 0x7c);
/// assert_eq!(blob[59], 0xfe);
/// ```
pub fn encode(geometry: &Geometry) -> Result<Vec<u8>, EncodeError> {
    if let Geometry::GeometryCollection(collection) = geometry {
        check_not_nested(collection)?;
    }

    let expected = encoded_len(geometry);
    let mut w = BlobWriter::with_capacity(expected);

    write_header(&mut w, geometry);
    write_body(&mut w, geometry)?;
    w.put_u8(END_MARKER);

    if w.len() != expected {
        return Err(EncodeError::SizeMismatch {
            expected,
            actual: w.len(),
        });
    }
    Ok(w.into_inner())
}

/// The blob format cannot represent nested collections
fn check_not_nested(collection: &GeometryCollection) -> Result<(), EncodeError> {
    for (index, child) in collection.geometries().iter().enumerate() {
        let found = child.geometry_type();
        if found.is_collection() {
            return Err(EncodeError::NestedCollection { index, found });
        }
    }
    Ok(())
}

fn write_header(w: &mut BlobWriter, geometry: &Geometry) {
    let mbr = geometry.mbr();
    w.put_u8(START_MARKER);
    w.put_u8(LITTLE_ENDIAN);
    w.put_i32(geometry.srid());
    w.put_f64(mbr.min_x);
    w.put_f64(mbr.min_y);
    w.put_f64(mbr.max_x);
    w.put_f64(mbr.max_y);
    w.put_u8(MBR_END_MARKER);
    w.put_i32(geometry.geometry_type().code());
}

fn write_body(w: &mut BlobWriter, geometry: &Geometry) -> Result<(), EncodeError> {
    match geometry {
        Geometry::Point(g) => write_point(w, g),
        Geometry::LineString(g) => write_line_string(w, g)?,
        Geometry::Polygon(g) => write_polygon(w, g)?,
        Geometry::MultiPoint(g) => {
            w.put_count(g.points().len())?;
            for point in g.points() {
                write_entity_prefix(w, GeometryType::Point);
                write_point(w, point);
            }
        }
        Geometry::MultiLineString(g) => {
            w.put_count(g.line_strings().len())?;
            for line_string in g.line_strings() {
                write_entity_prefix(w, GeometryType::LineString);
                write_line_string(w, line_string)?;
            }
        }
        Geometry::MultiPolygon(g) => {
            w.put_count(g.polygons().len())?;
            for polygon in g.polygons() {
                write_entity_prefix(w, GeometryType::Polygon);
                write_polygon(w, polygon)?;
            }
        }
        Geometry::GeometryCollection(g) => {
            w.put_count(g.geometries().len())?;
            for child in g.geometries() {
                write_entity_prefix(w, child.geometry_type());
                write_body(w, child)?;
            }
        }
    }
    Ok(())
}

/// Members of collections only carry a marker and their type code in front
/// of their body
fn write_entity_prefix(w: &mut BlobWriter, geometry_type: GeometryType) {
    w.put_u8(ENTITY_MARKER);
    w.put_i32(geometry_type.code());
}

fn write_point(w: &mut BlobWriter, point: &Point) {
    w.put_f64(point.x());
    w.put_f64(point.y());
}

fn write_line_string(w: &mut BlobWriter, line_string: &LineString) -> Result<(), EncodeError> {
    w.put_count(line_string.points().len())?;
    for point in line_string.points() {
        write_point(w, point);
    }
    Ok(())
}

fn write_polygon(w: &mut BlobWriter, polygon: &Polygon) -> Result<(), EncodeError> {
    w.put_count(polygon.rings().len())?;
    for ring in polygon.rings() {
        write_line_string(w, ring)?;
    }
    Ok(())
}
