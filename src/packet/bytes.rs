//! Byte-level plumbing the packet codec is written against. All multi-byte
//! integers are little-endian; strings are NUL-terminated UTF-8.

use crate::packet::error::PacketError;

pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u32_le(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes `value` followed by the NUL terminator. Fails if the string
    /// itself contains a NUL byte, since the wire form could not carry it.
    pub fn write_str_nul(&mut self, value: &str) -> Result<(), PacketError> {
        if value.as_bytes().contains(&0) {
            return Err(PacketError::InteriorNul);
        }
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.push(0);
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Overwrites 4 bytes at `offset` with `value`, for headers whose value
    /// is only known once the tail has been written.
    pub fn patch_u32_le(&mut self, offset: usize, value: u32) {
        self.buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ByteReader<'a> {
    buf: &'a [u8],
    cursor: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, cursor: 0 }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.cursor
    }

    pub fn total_len(&self) -> usize {
        self.buf.len()
    }

    pub fn read_u8(&mut self) -> Result<u8, PacketError> {
        if self.remaining() < 1 {
            return Err(PacketError::Truncated {
                offset: self.cursor,
                needed: 1,
            });
        }
        let value = self.buf[self.cursor];
        self.cursor += 1;
        Ok(value)
    }

    pub fn read_u32_le(&mut self) -> Result<u32, PacketError> {
        if self.remaining() < 4 {
            return Err(PacketError::Truncated {
                offset: self.cursor,
                needed: 4 - self.remaining(),
            });
        }
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.buf[self.cursor..self.cursor + 4]);
        self.cursor += 4;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads a NUL-terminated UTF-8 string and consumes its terminator.
    pub fn read_str_nul(&mut self) -> Result<&'a str, PacketError> {
        let start = self.cursor;
        let rest = &self.buf[start..];
        let nul = rest
            .iter()
            .position(|b| *b == 0)
            .ok_or(PacketError::UnterminatedString { offset: start })?;
        let value = std::str::from_utf8(&rest[..nul])
            .map_err(|_| PacketError::BadString { offset: start })?;
        self.cursor = start + nul + 1;
        Ok(value)
    }

    /// Consumes and returns the bytes from the cursor up to `end`
    /// (an absolute offset within the packet).
    pub fn take_until(&mut self, end: usize) -> Result<&'a [u8], PacketError> {
        if end < self.cursor || end > self.buf.len() {
            return Err(PacketError::BadPathOffset {
                offset: end,
                len: self.buf.len(),
            });
        }
        let slice = &self.buf[self.cursor..end];
        self.cursor = end;
        Ok(slice)
    }

    /// Consumes and returns everything left in the packet.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let slice = &self.buf[self.cursor..];
        self.cursor = self.buf.len();
        slice
    }
}
