use byteorder::{ByteOrder, LittleEndian};

use super::error::EncodeError;

/// Appends little-endian values to a buffer that has been allocated with its
/// final size
pub(super) struct BlobWriter {
    buf: Vec<u8>,
}

impl BlobWriter {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub(super) fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub(super) fn put_i32(&mut self, value: i32) {
        let mut bytes = [0u8; 4];
        LittleEndian::write_i32(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
    }

    pub(super) fn put_f64(&mut self, value: f64) {
        let mut bytes = [0u8; 8];
        LittleEndian::write_f64(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
    }

    /// Writes an element count, which has to fit into an `i32`
    pub(super) fn put_count(&mut self, count: usize) -> Result<(), EncodeError> {
        let value = i32::try_from(count).map_err(|_| EncodeError::CountOverflow(count))?;
        self.put_i32(value);
        Ok(())
    }

    pub(super) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(super) fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
