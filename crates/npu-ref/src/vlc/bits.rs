//! LSB-first bit packing.

use crate::error::{RefError, Result};

/// Appends bit fields, least significant bit first.
#[derive(Debug, Default)]
pub(crate) struct BitWriter {
    buf: Vec<u8>,
    acc: u64,
    filled: u32,
}

impl BitWriter {
    pub(crate) fn with_capacity(bytes: usize) -> Self {
        Self { buf: Vec::with_capacity(bytes), acc: 0, filled: 0 }
    }

    /// Write the low `n` bits of `value`, `n <= 32`.
    pub(crate) fn put(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32);
        if n == 0 {
            return;
        }
        let masked = u64::from(value) & ((1u64 << n) - 1);
        self.acc |= masked << self.filled;
        self.filled += n;
        while self.filled >= 8 {
            self.buf.push(self.acc.to_le_bytes()[0]);
            self.acc >>= 8;
            self.filled -= 8;
        }
    }

    /// `q` one bits followed by a zero.
    pub(crate) fn put_unary(&mut self, q: u32) {
        let mut left = q;
        while left >= 32 {
            self.put(u32::MAX, 32);
            left -= 32;
        }
        self.put((1u32 << left) - 1, left + 1);
    }

    /// Flush, zero-filling the last partial byte.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.buf.push(self.acc.to_le_bytes()[0]);
        }
        self.buf
    }
}

/// Reads fields written by [`BitWriter`].
#[derive(Debug)]
pub(crate) struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub(crate) const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn bit(&mut self) -> Result<u32> {
        let byte = self.data.get(self.pos / 8).ok_or(RefError::Truncated {
            needed: self.pos / 8 + 1,
            available: self.data.len(),
        })?;
        let b = (byte >> (self.pos % 8)) & 1;
        self.pos += 1;
        Ok(u32::from(b))
    }

    /// Read an `n`-bit field, `n <= 32`.
    pub(crate) fn get(&mut self, n: u32) -> Result<u32> {
        let mut v = 0u32;
        for i in 0..n {
            v |= self.bit()? << i;
        }
        Ok(v)
    }

    /// Read a unary count, rejecting runs longer than `limit`.
    pub(crate) fn get_unary(&mut self, limit: u32) -> Result<u32> {
        let mut q = 0;
        while self.bit()? == 1 {
            q += 1;
            if q > limit {
                return Err(RefError::malformed(format!("unary run exceeds {limit}")));
            }
        }
        Ok(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_pack_lsb_first() {
        let mut w = BitWriter::default();
        w.put(0b101, 3);
        w.put(0b1, 1);
        w.put(0xab, 8);
        let bytes = w.finish();
        assert_eq!(bytes, vec![0b1011_1101, 0b0000_1010]);

        let mut r = BitReader::new(&bytes);
        assert_eq!(r.get(3).unwrap(), 0b101);
        assert_eq!(r.get(1).unwrap(), 1);
        assert_eq!(r.get(8).unwrap(), 0xab);
    }

    #[test]
    fn unary_round_trip() {
        let mut w = BitWriter::default();
        for q in [0, 1, 5, 33, 47] {
            w.put_unary(q);
        }
        let bytes = w.finish();
        let mut r = BitReader::new(&bytes);
        for q in [0, 1, 5, 33, 47] {
            assert_eq!(r.get_unary(47).unwrap(), q);
        }
    }

    #[test]
    fn reader_reports_truncation() {
        let mut r = BitReader::new(&[0xff]);
        assert!(r.get_unary(100).is_err());
        let mut r = BitReader::new(&[]);
        assert!(matches!(r.get(1), Err(RefError::Truncated { .. })));
    }
}
