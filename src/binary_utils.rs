use crate::error::{Error, Result};

/// Byte order used for multi-byte reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Forward-only read cursor over a byte slice.
///
/// Reads never move past the end of the slice: a short read fails with
/// [`Error::UnexpectedEof`] and leaves the position untouched.
#[derive(Clone, Debug)]
pub struct EndianCursor<'a> {
    data: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> EndianCursor<'a> {
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            data,
            pos: 0,
            order,
        }
    }

    pub fn big_endian(data: &'a [u8]) -> Self {
        Self::new(data, ByteOrder::Big)
    }

    pub fn little_endian(data: &'a [u8]) -> Self {
        Self::new(data, ByteOrder::Little)
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// A copy of this cursor, at the same position, reading in `order`.
    pub fn with_order(&self, order: ByteOrder) -> Self {
        Self {
            data: self.data,
            pos: self.pos,
            order,
        }
    }

    /// Current absolute byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Move to an absolute position. Only used to return to a saved offset.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(Error::SeekOutOfBounds {
                position,
                len: self.data.len(),
            });
        }
        self.pos = position;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Run `probe` against this cursor and restore the starting position
    /// afterwards, whatever the probe returned.
    pub fn speculate<T>(&mut self, probe: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.pos;
        let result = probe(self);
        self.pos = saved;
        result
    }

    /// Up to `n` bytes from the current position, without consuming them.
    pub fn peek_up_to(&self, n: usize) -> &'a [u8] {
        let start = self.pos.min(self.data.len());
        let end = start + n.min(self.data.len() - start);
        &self.data[start..end]
    }

    /// Read exactly `n` raw bytes.
    pub fn read_tag(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a 4-byte chunk tag.
    pub fn read_magic(&mut self) -> Result<[u8; 4]> {
        Ok(self.read_array()?)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array()?;
        Ok(b)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        let [b] = self.read_array()?;
        Ok(i8::from_ne_bytes([b]))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_array()?;
        Ok(match self.order {
            ByteOrder::Big => u16::from_be_bytes(bytes),
            ByteOrder::Little => u16::from_le_bytes(bytes),
        })
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let bytes = self.read_array()?;
        Ok(match self.order {
            ByteOrder::Big => i16::from_be_bytes(bytes),
            ByteOrder::Little => i16::from_le_bytes(bytes),
        })
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_array()?;
        Ok(match self.order {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        })
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_tag(N)?);
        Ok(buf)
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(Error::UnexpectedEof {
                offset: self.pos,
                need: n,
                have: self.remaining(),
            });
        }
        Ok(())
    }
}
