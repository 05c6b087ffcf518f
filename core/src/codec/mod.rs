//! Encoding and decoding of geometries in SpatiaLite's internal blob format
//!
//! A blob starts with a fixed 43-byte header:
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0 | 1 | start marker `0x00` |
//! | 1 | 1 | byte order, `0x01` little-endian, `0x00` big-endian |
//! | 2 | 4 | SRID |
//! | 6 | 32 | MBR (min x, min y, max x, max y) |
//! | 38 | 1 | MBR end marker `0x7c` |
//! | 39 | 4 | geometry type code |
//!
//! It is followed by the body of the geometry and the end marker `0xfe`.
//! Members of multi geometries and collections are written as the entity
//! marker `0x69`, their type code and their body. They have no header of
//! their own and share the SRID of their parent.
//!
//! See <https://www.gaia-gis.it/gaia-sins/BLOB-Geometry.html>

pub use self::decode::{
    decode, decode_as, decode_geometry_collection, decode_line_string, decode_multi_line_string,
    decode_multi_point, decode_multi_polygon, decode_point, decode_polygon, decode_with,
    decode_with_header, read_header,
};
pub use self::encode::{encode, encoded_len};
pub use self::error::{DecodeError, DecodeErrorKind, EncodeError};

use crate::geometry::{GeometryType, Mbr};

mod decode;
mod encode;
pub mod error;
mod reader;
mod writer;

const START_MARKER: u8 = 0x00;
const BIG_ENDIAN: u8 = 0x00;
const LITTLE_ENDIAN: u8 = 0x01;
const MBR_END_MARKER: u8 = 0x7c;
const ENTITY_MARKER: u8 = 0x69;
const END_MARKER: u8 = 0xfe;

/// Length of the header, including the type code
pub const HEADER_LEN: usize = 43;
const MBR_OFFSET: usize = 6;
const TYPE_OFFSET: usize = 39;

const COUNT_LEN: usize = 4;
const POINT_LEN: usize = 16;
const ENTITY_PREFIX_LEN: usize = 5;

/// The byte order of a blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

/// The information stored in the header of a blob
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    pub byte_order: Endianness,
    pub srid: i32,
    pub mbr: Mbr,
    pub geometry_type: GeometryType,
}

/// Options for [`decode_with`]
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Compare the MBR stored in the header with the MBR of the decoded
    /// geometry and fail if they differ
    pub verify_mbr: bool,
}
