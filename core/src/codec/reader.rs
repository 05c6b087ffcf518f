use std::{io::Cursor, marker::PhantomData};

use byteorder::{ByteOrder, ReadBytesExt};

use super::error::{DecodeError, DecodeErrorKind};
use crate::geometry::GeometryType;

/// Reads primitive values from a blob in the byte order `B` and keeps track
/// of the current offset for error reporting
pub(super) struct BlobReader<'a, B> {
    cursor: Cursor<&'a [u8]>,
    order: PhantomData<B>,
}

impl<'a, B: ByteOrder> BlobReader<'a, B> {
    pub(super) fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            order: PhantomData,
        }
    }

    pub(super) fn offset(&self) -> usize {
        self.cursor.position() as usize
    }

    pub(super) fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.offset())
    }

    /// Fails if fewer than `needed` bytes are left
    pub(super) fn ensure(&self, needed: usize) -> Result<(), DecodeError> {
        let available = self.remaining();
        if available < needed {
            return Err(DecodeError::new(
                DecodeErrorKind::Truncated { needed, available },
                self.offset(),
            ));
        }
        Ok(())
    }

    pub(super) fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.ensure(1)?;
        self.cursor.read_u8().map_err(|_| self.truncated(1))
    }

    pub(super) fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.ensure(4)?;
        self.cursor.read_i32::<B>().map_err(|_| self.truncated(4))
    }

    pub(super) fn read_f64(&mut self) -> Result<f64, DecodeError> {
        self.ensure(8)?;
        self.cursor.read_f64::<B>().map_err(|_| self.truncated(8))
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::new(
            DecodeErrorKind::Truncated {
                needed,
                available: self.remaining(),
            },
            self.offset(),
        )
    }

    /// Reads a single byte and fails with the error produced by `kind` if it
    /// differs from `expected`
    pub(super) fn marker(
        &mut self,
        expected: u8,
        kind: fn(u8) -> DecodeErrorKind,
    ) -> Result<(), DecodeError> {
        let offset = self.offset();
        let found = self.read_u8()?;
        if found != expected {
            return Err(DecodeError::new(kind(found), offset));
        }
        Ok(())
    }

    /// Reads an element count. Fails if the count is negative or if the
    /// remaining bytes cannot hold `count` elements of at least
    /// `min_element_len` bytes each.
    pub(super) fn count(&mut self, min_element_len: usize) -> Result<usize, DecodeError> {
        let offset = self.offset();
        let count = self.read_i32()?;
        let count = usize::try_from(count)
            .map_err(|_| DecodeError::new(DecodeErrorKind::NegativeCount(count), offset))?;
        self.ensure(count.saturating_mul(min_element_len))?;
        Ok(count)
    }

    pub(super) fn geometry_type(&mut self) -> Result<GeometryType, DecodeError> {
        let offset = self.offset();
        let code = self.read_i32()?;
        GeometryType::from_code(code)
            .ok_or_else(|| DecodeError::new(DecodeErrorKind::UnknownType(code), offset))
    }

    /// Fails if there are bytes left
    pub(super) fn finish(&self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(DecodeError::new(
                DecodeErrorKind::TrailingBytes(n),
                self.offset(),
            )),
        }
    }
}
