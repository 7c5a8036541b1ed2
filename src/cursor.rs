use crate::codepage::{Codepage, TextDecoder};
use crate::error::{MtlError, Result};

/// Sequential little-endian reader over an in-memory buffer.
///
/// The position only ever moves forward, and a failed read leaves it where
/// it was.
#[derive(Debug, Clone)]
pub struct BinaryCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryCursor<'a> {
    /// Starts reading at the beginning of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads `n` raw single-byte characters without copying.
    pub fn read_chars(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads a little-endian signed 32-bit integer.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian IEEE-754 single.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Reads `N` consecutive floats.
    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N]> {
        self.ensure(N * 4)?;
        let mut values = [0.0f32; N];
        for value in &mut values {
            *value = self.read_f32()?;
        }
        Ok(values)
    }

    /// Reads exactly `byte_len` bytes and decodes them as text in `codepage`.
    pub fn read_string<T>(
        &mut self,
        byte_len: usize,
        codepage: Codepage,
        text: &T,
    ) -> Result<String>
    where
        T: TextDecoder + ?Sized,
    {
        let offset = self.pos;
        self.ensure(byte_len)?;
        let bytes = &self.data[offset..offset + byte_len];
        let decoded = text
            .decode(bytes, codepage)
            .ok_or(MtlError::DecodeError { offset, codepage })?;
        self.pos += byte_len;
        Ok(decoded)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.read_chars(N)?);
        Ok(bytes)
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(MtlError::TruncatedData {
                offset: self.pos,
                need: n,
                have: self.remaining(),
            });
        }
        Ok(())
    }
}
