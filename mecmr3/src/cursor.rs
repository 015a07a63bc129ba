//! Byte-stream cursor over an in-memory slice.
//!
//! No hidden allocation and no endianness-dependent code paths — the
//! container format is little-endian throughout, so every multi-byte
//! read goes through `byteorder::LittleEndian` explicitly rather than
//! relying on host byte order.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{MecMr3Error, Result};

/// Read-only cursor over a borrowed byte slice.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Borrow the next `n` bytes and advance the cursor.
    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(MecMr3Error::Eof {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.read_exact(4)?;
        Ok(LittleEndian::read_u32(bytes))
    }

    /// Borrow the next `n` bytes without advancing the cursor.
    pub fn peek_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(MecMr3Error::Eof {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        Ok(&self.data[self.pos..self.pos + n])
    }

    /// Advance past `n` bytes already inspected via `peek_exact`.
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }
}

/// Paired input/output cursor used by the scrubber.
///
/// `mirror` copies bytes from the input slice to the output buffer
/// unchanged; PHI-bearing items read the bytes, mutate a scratch copy,
/// then write the mutated copy instead of mirroring.
pub struct MirrorCursor<'a> {
    input: &'a [u8],
    output: Vec<u8>,
    pos: usize,
}

impl<'a> MirrorCursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        MirrorCursor {
            input,
            output: vec![0u8; input.len()],
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    /// Read the next `n` bytes without writing anything yet.
    pub fn peek_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(MecMr3Error::Eof {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        Ok(&self.input[self.pos..self.pos + n])
    }

    /// Read a little-endian `u32`, mirroring its 4 bytes unchanged.
    pub fn mirror_u32_le(&mut self) -> Result<u32> {
        let bytes = self.mirror(4)?;
        Ok(LittleEndian::read_u32(bytes))
    }

    /// Copy `n` bytes from input to output unchanged, advancing both.
    pub fn mirror(&mut self, n: usize) -> Result<&'a [u8]> {
        let slice = self.peek_exact(n)?;
        self.output[self.pos..self.pos + n].copy_from_slice(slice);
        self.pos += n;
        Ok(slice)
    }

    /// Advance past `n` input bytes, writing `replacement` (of the same
    /// length) into the output instead of mirroring.
    pub fn write_replacement(&mut self, n: usize, replacement: &[u8]) -> Result<()> {
        assert_eq!(replacement.len(), n, "replacement must match mirrored length");
        if self.remaining() < n {
            return Err(MecMr3Error::Eof {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        self.output[self.pos..self.pos + n].copy_from_slice(replacement);
        self.pos += n;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_u32_le_reads_little_endian() {
        let data = [0x01, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u32_le().unwrap(), 1);
        assert_eq!(cursor.read_u32_le().unwrap(), u32::MAX);
        assert!(cursor.at_end());
    }

    #[test]
    fn read_exact_reports_eof() {
        let data = [0u8; 3];
        let mut cursor = ByteCursor::new(&data);
        match cursor.read_exact(4) {
            Err(MecMr3Error::Eof { offset, needed }) => {
                assert_eq!(offset, 0);
                assert_eq!(needed, 1);
            }
            other => panic!("expected Eof, got {other:?}"),
        }
    }

    #[test]
    fn mirror_copies_bytes_unchanged() {
        let data = [1, 2, 3, 4, 5];
        let mut cursor = MirrorCursor::new(&data);
        cursor.mirror(2).unwrap();
        cursor.mirror(3).unwrap();
        assert_eq!(cursor.into_output(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn write_replacement_overrides_output_only() {
        let data = [1, 2, 3, 4];
        let mut cursor = MirrorCursor::new(&data);
        cursor.write_replacement(4, &[0x20, 0x20, 0x20, 0x20]).unwrap();
        assert_eq!(cursor.into_output(), vec![0x20, 0x20, 0x20, 0x20]);
    }
}
