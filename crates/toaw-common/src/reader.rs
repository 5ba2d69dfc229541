//! Binary reader for zero-copy parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! little-endian fields and fixed-size spans from a byte slice without copying
//! until a value is produced.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader over a byte slice.
///
/// All multi-byte integers are little-endian, which is the byte order of every
/// TOAW file generation.
///
/// # Example
///
/// ```
/// use toaw_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0xe7, 0x03, 0x00, 0x00];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_i32().unwrap(), 999);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(Error::OutOfBounds {
                start: position,
                end: position,
                len: self.data.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Skip a number of bytes, failing if fewer remain.
    #[inline]
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                offset: self.position,
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Borrow `len` bytes at an absolute offset without moving the cursor.
    pub fn slice_at(&self, start: usize, len: usize) -> Result<&'a [u8]> {
        let end = start.checked_add(len).ok_or(Error::OutOfBounds {
            start,
            end: usize::MAX,
            len: self.data.len(),
        })?;
        self.data.get(start..end).ok_or(Error::OutOfBounds {
            start,
            end,
            len: self.data.len(),
        })
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a fixed-size byte array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.read_struct::<[u8; N]>()
    }

    /// Read a fixed-size byte array straight onto the heap.
    ///
    /// Used for spans too large to pass around by value.
    pub fn read_boxed_array<const N: usize>(&mut self) -> Result<Box<[u8; N]>> {
        let offset = self.position;
        let bytes = self.read_bytes(N)?;
        bytes
            .to_vec()
            .into_boxed_slice()
            .try_into()
            .map_err(|_| Error::UnexpectedEof {
                offset,
                needed: N,
                available: bytes.len(),
            })
    }

    /// Read `N` consecutive little-endian u32 values.
    pub fn read_u32_array<const N: usize>(&mut self) -> Result<[u32; N]> {
        let mut values = [0u32; N];
        for value in &mut values {
            *value = self.read_u32()?;
        }
        Ok(values)
    }

    /// Read a plain-bytes value using zerocopy.
    ///
    /// Only use this for types whose layout has no byte-order dependence
    /// (byte arrays and structs made of them).
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let offset = self.position;
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            offset,
            needed: size,
            available: bytes.len(),
        })
    }

    /// Peek at a little-endian u32 at an absolute offset.
    pub fn u32_at(&self, offset: usize) -> Result<u32> {
        let bytes = self.slice_at(offset, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
