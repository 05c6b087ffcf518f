use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::{
    error::{DecodeError, DecodeErrorKind},
    reader::BlobReader,
    DecodeOptions, Endianness, Header, BIG_ENDIAN, COUNT_LEN, END_MARKER, ENTITY_MARKER,
    ENTITY_PREFIX_LEN, LITTLE_ENDIAN, MBR_END_MARKER, MBR_OFFSET, POINT_LEN, START_MARKER,
    TYPE_OFFSET,
};
use crate::geometry::{
    Geometry, GeometryCollection, GeometryKind, GeometryType, LineString, Mbr, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, ValidationError,
};

/// Decodes a SpatiaLite blob. Both byte orders are supported. The MBR
/// stored in the header is not compared with the decoded coordinates; use
/// [`decode_with`] to enable that check.
pub fn decode(bytes: &[u8]) -> Result<Geometry, DecodeError> {
    decode_with(bytes, &DecodeOptions::default())
}

/// Decodes a SpatiaLite blob with the given options
pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<Geometry, DecodeError> {
    decode_with_header(bytes, options).map(|(_, geometry)| geometry)
}

/// Decodes a SpatiaLite blob and also returns the header it was read from
///
/// ```rust
/// use spatia_core::{codec, geometry::Point};
///
/// let blob = codec::encode(&Point::with_srid(1.0, 2.0, 3857).into()).unwrap();
/// let (header, geometry) = codec::decode_with_header(&blob, &Default::default()).unwrap();
/// assert_eq!(header.srid, 3857);
/// assert_eq!(header.mbr, geometry.mbr());
/// ```
pub fn decode_with_header(
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<(Header, Geometry), DecodeError> {
    decode_parts(bytes, options, None)
}

fn decode_parts(
    bytes: &[u8],
    options: &DecodeOptions,
    expected: Option<GeometryType>,
) -> Result<(Header, Geometry), DecodeError> {
    match byte_order(bytes)? {
        Endianness::Little => {
            decode_blob::<LittleEndian>(bytes, Endianness::Little, options, expected)
        }
        Endianness::Big => decode_blob::<BigEndian>(bytes, Endianness::Big, options, expected),
    }
}

/// Decodes a blob that must contain a geometry of type `T`
///
/// ```rust
/// use spatia_core::{codec, geometry::{LineString, Point}};
///
/// let blob = codec::encode(&Point::new(1.0, 2.0).into()).unwrap();
/// assert_eq!(codec::decode_as::<Point>(&blob).unwrap(), Point::new(1.0, 2.0));
/// assert!(codec::decode_as::<LineString>(&blob).is_err());
/// ```
pub fn decode_as<T>(bytes: &[u8]) -> Result<T, DecodeError>
where
    T: GeometryKind + TryFrom<Geometry, Error = Geometry>,
{
    let (_, geometry) = decode_parts(bytes, &DecodeOptions::default(), Some(T::TYPE))?;
    geometry
        .try_into()
        .map_err(|g: Geometry| unexpected_type(T::TYPE, g.geometry_type()))
}

fn unexpected_type(expected: GeometryType, actual: GeometryType) -> DecodeError {
    DecodeError::new(
        DecodeErrorKind::UnexpectedType { expected, actual },
        TYPE_OFFSET,
    )
}

pub fn decode_point(bytes: &[u8]) -> Result<Point, DecodeError> {
    decode_as(bytes)
}

pub fn decode_line_string(bytes: &[u8]) -> Result<LineString, DecodeError> {
    decode_as(bytes)
}

pub fn decode_polygon(bytes: &[u8]) -> Result<Polygon, DecodeError> {
    decode_as(bytes)
}

pub fn decode_multi_point(bytes: &[u8]) -> Result<MultiPoint, DecodeError> {
    decode_as(bytes)
}

pub fn decode_multi_line_string(bytes: &[u8]) -> Result<MultiLineString, DecodeError> {
    decode_as(bytes)
}

pub fn decode_multi_polygon(bytes: &[u8]) -> Result<MultiPolygon, DecodeError> {
    decode_as(bytes)
}

pub fn decode_geometry_collection(bytes: &[u8]) -> Result<GeometryCollection, DecodeError> {
    decode_as(bytes)
}

/// Reads only the fixed-size header of a blob
pub fn read_header(bytes: &[u8]) -> Result<Header, DecodeError> {
    match byte_order(bytes)? {
        Endianness::Little => BlobReader::<LittleEndian>::new(bytes).header(Endianness::Little),
        Endianness::Big => BlobReader::<BigEndian>::new(bytes).header(Endianness::Big),
    }
}

/// Validates the start marker and reads the byte order marker
fn byte_order(bytes: &[u8]) -> Result<Endianness, DecodeError> {
    // the first two bytes do not depend on the byte order
    let mut reader = BlobReader::<LittleEndian>::new(bytes);
    reader.marker(START_MARKER, DecodeErrorKind::StartMarker)?;
    let offset = reader.offset();
    match reader.read_u8()? {
        LITTLE_ENDIAN => Ok(Endianness::Little),
        BIG_ENDIAN => Ok(Endianness::Big),
        b => Err(DecodeError::new(DecodeErrorKind::ByteOrder(b), offset)),
    }
}

/// Decodes a whole blob. If `expected` is given, the type code in the header
/// is checked before the body is read.
fn decode_blob<B: ByteOrder>(
    bytes: &[u8],
    byte_order: Endianness,
    options: &DecodeOptions,
    expected: Option<GeometryType>,
) -> Result<(Header, Geometry), DecodeError> {
    let mut reader = BlobReader::<B>::new(bytes);
    let header = reader.header(byte_order)?;
    if let Some(expected) = expected {
        if header.geometry_type != expected {
            return Err(unexpected_type(expected, header.geometry_type));
        }
    }
    let geometry = reader.geometry(header.geometry_type, header.srid)?;
    reader.marker(END_MARKER, DecodeErrorKind::EndMarker)?;
    reader.finish()?;

    if options.verify_mbr && geometry.mbr() != header.mbr {
        return Err(DecodeError::new(DecodeErrorKind::MbrMismatch, MBR_OFFSET));
    }

    Ok((header, geometry))
}

fn invalid(error: ValidationError, offset: usize) -> DecodeError {
    DecodeError::new(DecodeErrorKind::Invalid(error), offset)
}

impl<B: ByteOrder> BlobReader<'_, B> {
    fn header(&mut self, byte_order: Endianness) -> Result<Header, DecodeError> {
        self.marker(START_MARKER, DecodeErrorKind::StartMarker)?;
        self.read_u8()?;
        let srid = self.read_i32()?;
        let min_x = self.read_f64()?;
        let min_y = self.read_f64()?;
        let max_x = self.read_f64()?;
        let max_y = self.read_f64()?;
        self.marker(MBR_END_MARKER, DecodeErrorKind::MbrEndMarker)?;
        let geometry_type = self.geometry_type()?;

        Ok(Header {
            byte_order,
            srid,
            mbr: Mbr::new(min_x, min_y, max_x, max_y, srid),
            geometry_type,
        })
    }

    /// Reads the body of a geometry of the given type. Members of
    /// collections inherit `srid`.
    fn geometry(
        &mut self,
        geometry_type: GeometryType,
        srid: i32,
    ) -> Result<Geometry, DecodeError> {
        let offset = self.offset();
        let geometry = match geometry_type {
            GeometryType::Point => self.point(srid)?.into(),
            GeometryType::LineString => self.line_string(srid)?.into(),
            GeometryType::Polygon => self.polygon(srid)?.into(),
            GeometryType::MultiPoint => MultiPoint::new(self.members(srid, Self::point)?)
                .map_err(|e| invalid(e, offset))?
                .into(),
            GeometryType::MultiLineString => {
                MultiLineString::new(self.members(srid, Self::line_string)?)
                    .map_err(|e| invalid(e, offset))?
                    .into()
            }
            GeometryType::MultiPolygon => MultiPolygon::new(self.members(srid, Self::polygon)?)
                .map_err(|e| invalid(e, offset))?
                .into(),
            GeometryType::GeometryCollection => {
                GeometryCollection::new(self.collection_members(srid)?)
                    .map_err(|e| invalid(e, offset))?
                    .into()
            }
        };
        Ok(geometry)
    }

    fn point(&mut self, srid: i32) -> Result<Point, DecodeError> {
        let x = self.read_f64()?;
        let y = self.read_f64()?;
        Ok(Point::with_srid(x, y, srid))
    }

    fn line_string(&mut self, srid: i32) -> Result<LineString, DecodeError> {
        let offset = self.offset();
        let n = self.count(POINT_LEN)?;
        let points = (0..n)
            .map(|_| self.point(srid))
            .collect::<Result<Vec<_>, _>>()?;
        LineString::new(points).map_err(|e| invalid(e, offset))
    }

    fn polygon(&mut self, srid: i32) -> Result<Polygon, DecodeError> {
        let offset = self.offset();
        let n = self.count(COUNT_LEN)?;
        let rings = (0..n)
            .map(|_| self.line_string(srid))
            .collect::<Result<Vec<_>, _>>()?;
        Polygon::new(rings).map_err(|e| invalid(e, offset))
    }

    /// Reads the entity marker and the type code in front of a collection
    /// member. Returns the type and the offset of the type code.
    fn entity(&mut self) -> Result<(GeometryType, usize), DecodeError> {
        self.marker(ENTITY_MARKER, DecodeErrorKind::EntityMarker)?;
        let offset = self.offset();
        Ok((self.geometry_type()?, offset))
    }

    /// Reads the members of a multi geometry, which must all be of type `T`
    fn members<T: GeometryKind>(
        &mut self,
        srid: i32,
        read: impl Fn(&mut Self, i32) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let n = self.count(ENTITY_PREFIX_LEN + COUNT_LEN)?;
        (0..n)
            .map(|_| {
                let (actual, offset) = self.entity()?;
                if actual != T::TYPE {
                    return Err(DecodeError::new(
                        DecodeErrorKind::UnexpectedType {
                            expected: T::TYPE,
                            actual,
                        },
                        offset,
                    ));
                }
                read(self, srid)
            })
            .collect()
    }

    fn collection_members(&mut self, srid: i32) -> Result<Vec<Geometry>, DecodeError> {
        let n = self.count(ENTITY_PREFIX_LEN + COUNT_LEN)?;
        (0..n)
            .map(|_| {
                let (geometry_type, offset) = self.entity()?;
                if geometry_type.is_collection() {
                    return Err(DecodeError::new(
                        DecodeErrorKind::NestedCollection(geometry_type),
                        offset,
                    ));
                }
                self.geometry(geometry_type, srid)
            })
            .collect()
    }
}
