use thiserror::Error;

use crate::geometry::{GeometryType, ValidationError};

/// The reason why a blob could not be decoded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeErrorKind {
    #[error("expected start marker 0x00, found {0:#04x}")]
    StartMarker(u8),

    /// Also returned for TinyPoint blobs (0x80 and 0x81)
    #[error("unrecognized byte order {0:#04x}")]
    ByteOrder(u8),

    #[error("expected MBR end marker 0x7c, found {0:#04x}")]
    MbrEndMarker(u8),

    #[error("expected entity marker 0x69, found {0:#04x}")]
    EntityMarker(u8),

    #[error("expected end marker 0xfe, found {0:#04x}")]
    EndMarker(u8),

    #[error("unknown geometry type {0}")]
    UnknownType(i32),

    #[error("expected {expected}, found {actual}")]
    UnexpectedType {
        expected: GeometryType,
        actual: GeometryType,
    },

    #[error("negative element count {0}")]
    NegativeCount(i32),

    #[error("blob truncated, {needed} more bytes needed but only {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("{0} unexpected bytes after end marker")]
    TrailingBytes(usize),

    #[error("geometry collections must not contain a {0}")]
    NestedCollection(GeometryType),

    #[error("MBR in header does not match the geometry's coordinates")]
    MbrMismatch,

    #[error("invalid geometry: {0}")]
    Invalid(ValidationError),
}

/// An error that happened while decoding a blob. `offset` is the position of
/// the offending byte or value in the blob.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at offset {offset}")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub offset: usize,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// An error that happened while encoding a geometry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("geometry collections must not be nested ({found} at index {index})")]
    NestedCollection { index: usize, found: GeometryType },

    #[error("{0} elements do not fit into a 32-bit count")]
    CountOverflow(usize),

    #[error("encoded {actual} bytes but expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}
