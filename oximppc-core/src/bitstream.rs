//! MSB-first bit I/O for the MPPC bitstream.
//!
//! MPPC packs codewords starting from the most significant bit of each
//! byte, and continues across bytes in stream order. Input arrives one byte
//! at a time from the network, so [`PendingBitReader`] owns a growing queue
//! of not-yet-consumed bytes instead of borrowing a complete slice.
//!
//! # Example
//!
//! ```
//! use oximppc_core::bitstream::{MsbBitWriter, PendingBitReader};
//!
//! let mut writer = MsbBitWriter::new();
//! writer.write_bits(0b101, 3);
//! writer.write_bits(0b1100, 4);
//! let data = writer.finish();
//!
//! let mut reader = PendingBitReader::new();
//! reader.extend(&data);
//! assert_eq!(reader.read_field(3).unwrap(), 0b101);
//! assert_eq!(reader.read_field(4).unwrap(), 0b1100);
//! ```

use crate::cast::{i32_to_u32, u8_to_u32, u32_to_i32};
use crate::error::{MppcError, Result};
use std::collections::VecDeque;

/// Widest field a single read may extract.
pub const MAX_READ_BITS: u32 = 16;

/// Bit reader over a queue of pending input bytes.
///
/// Bytes are appended at the back with [`push_byte`](Self::push_byte) and
/// consumed from the front. At most `bit_offset` bits (0-7) of the front
/// byte have already been consumed.
#[derive(Debug, Clone, Default)]
pub struct PendingBitReader {
    /// Not-yet-fully-consumed input bytes.
    pending: VecDeque<u8>,
    /// Bits already consumed from the front byte.
    bit_offset: u32,
}

impl PendingBitReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            bit_offset: 0,
        }
    }

    /// Append one input byte.
    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        self.pending.push_back(byte);
    }

    /// Append a run of input bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes.iter().copied());
    }

    /// Number of bits that can still be read.
    #[inline]
    pub fn available_bits(&self) -> usize {
        self.pending.len() * 8 - self.bit_offset as usize
    }

    /// Whether at least `count` bits can be read.
    #[inline]
    pub fn has_bits(&self, count: u32) -> bool {
        self.available_bits() >= count as usize
    }

    /// Bits already consumed from the front byte (always below 8).
    pub fn bit_offset(&self) -> u32 {
        self.bit_offset
    }

    /// Number of bytes still (partly) pending.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Read `count` bits, MSB-first, with sign propagation.
    ///
    /// Up to four leading pending bytes are loaded into a 32-bit
    /// accumulator, shifted left past the consumed bits, then shifted right
    /// *arithmetically* by `32 - count`. When the first extracted bit is set
    /// the result therefore has every bit above the field set as well
    /// (reading `1` as a 1-bit field yields `0xFFFF_FFFF`). Use
    /// [`read_field`](Self::read_field) for the plain `count`-bit value.
    ///
    /// A `count` of 0 or above [`MAX_READ_BITS`] returns 0 and consumes
    /// nothing.
    pub fn read_bits(&mut self, count: u32) -> Result<u32> {
        if count == 0 || count > MAX_READ_BITS {
            return Ok(0);
        }

        if !self.has_bits(count) {
            return Err(MppcError::underflow(count, self.available_bits()));
        }

        let mut acc: u32 = 0;
        for (i, &byte) in self.pending.iter().take(4).enumerate() {
            acc |= u8_to_u32(byte) << (24 - 8 * i as u32);
        }
        acc <<= self.bit_offset;

        let value = u32_to_i32(acc) >> (32 - count);

        self.bit_offset += count;
        let consumed = (self.bit_offset / 8) as usize;
        self.pending.drain(..consumed);
        self.bit_offset %= 8;

        Ok(i32_to_u32(value))
    }

    /// Read `count` bits and keep only the low `count` bits of the result.
    #[inline]
    pub fn read_field(&mut self, count: u32) -> Result<u32> {
        let value = self.read_bits(count)?;
        let mask = if count >= 32 {
            u32::MAX
        } else {
            (1u32 << count) - 1
        };
        Ok(value & mask)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Drop the rest of a partially consumed front byte.
    ///
    /// Returns `true` if any bits were discarded.
    pub fn discard_partial_byte(&mut self) -> bool {
        if self.bit_offset == 0 {
            return false;
        }
        self.bit_offset = 0;
        self.pending.pop_front();
        true
    }

    /// Drop all pending input.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.bit_offset = 0;
    }
}

/// MSB-first bit writer.
///
/// Used to build MPPC streams for tests and benchmarks. It only packs bits;
/// choosing codewords is up to the caller.
#[derive(Debug, Default)]
pub struct MsbBitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Bit buffer, filled from the low end.
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u32,
    /// Total bits written.
    total_bits: u64,
}

impl MsbBitWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds 32.
    pub fn write_bits(&mut self, value: u32, count: u32) {
        assert!(count <= 32, "at most 32 bits per write, got {}", count);
        if count == 0 {
            return;
        }

        let mask = if count == 32 {
            u64::from(u32::MAX)
        } else {
            (1u64 << count) - 1
        };
        self.buffer = (self.buffer << count) | (u64::from(value) & mask);
        self.bits_in_buffer += count;
        self.total_bits += u64::from(count);

        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(u32::from(bit), 1);
    }

    /// Pad with zero bits up to the next byte boundary.
    pub fn align_to_byte(&mut self) {
        if self.bits_in_buffer > 0 {
            self.write_bits(0, 8 - self.bits_in_buffer);
        }
    }

    /// Total bits written so far, excluding padding not yet added.
    pub fn bits_written(&self) -> u64 {
        self.total_bits
    }

    /// Whether the writer sits on a byte boundary.
    pub fn is_aligned(&self) -> bool {
        self.bits_in_buffer == 0
    }

    /// Pad to a byte boundary and return the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_roundtrip() {
        let mut writer = MsbBitWriter::new();
        writer.write_bits(0b101, 3);
        writer.write_bits(0b1100, 4);
        writer.write_bits(0b1111_1111, 8);
        let data = writer.finish();

        let mut reader = PendingBitReader::new();
        reader.extend(&data);
        assert_eq!(reader.read_field(3).unwrap(), 0b101);
        assert_eq!(reader.read_field(4).unwrap(), 0b1100);
        assert_eq!(reader.read_field(8).unwrap(), 0b1111_1111);
    }

    #[test]
    fn test_read_bits_sign_propagates() {
        let mut reader = PendingBitReader::new();
        reader.push_byte(0x41); // 0100_0001

        assert_eq!(reader.read_bits(1).unwrap(), 0);
        // Remaining 7 bits 1000001 sit at the top of the accumulator.
        assert_eq!(reader.read_bits(7).unwrap(), 0xFFFF_FFC1);
        assert_eq!(reader.pending_len(), 0);
        assert_eq!(reader.bit_offset(), 0);
    }

    #[test]
    fn test_read_field_masks_sign_extension() {
        let mut reader = PendingBitReader::new();
        reader.push_byte(0x41);
        assert_eq!(reader.read_field(1).unwrap(), 0);
        assert_eq!(reader.read_field(7).unwrap(), 0x41);
    }

    #[test]
    fn test_single_set_bit_is_all_ones() {
        let mut reader = PendingBitReader::new();
        reader.push_byte(0x80);
        assert_eq!(reader.read_bits(1).unwrap(), u32::MAX);
        assert!(!reader.read_bit().unwrap());
    }

    #[test]
    fn test_read_across_bytes() {
        let mut reader = PendingBitReader::new();
        reader.extend(&[0b1010_1010, 0b1100_1100, 0b1111_0000]);

        assert_eq!(reader.read_field(3).unwrap(), 0b101);
        assert_eq!(reader.read_field(13).unwrap(), 0b0_1010_1100_1100);
        assert_eq!(reader.pending_len(), 1);
        assert_eq!(reader.bit_offset(), 0);
        assert_eq!(reader.read_field(4).unwrap(), 0b1111);
        assert_eq!(reader.available_bits(), 4);
    }

    #[test]
    fn test_sixteen_bits_with_offset() {
        let mut reader = PendingBitReader::new();
        reader.extend(&[0x7F, 0xFF, 0xFF]);
        assert_eq!(reader.read_field(7).unwrap(), 0x3F);
        assert_eq!(reader.read_field(16).unwrap(), 0xFFFF);
        assert_eq!(reader.available_bits(), 1);
    }

    #[test]
    fn test_has_bits_does_not_consume() {
        let mut reader = PendingBitReader::new();
        assert!(!reader.has_bits(1));
        assert!(reader.has_bits(0));

        reader.push_byte(0xFF);
        assert!(reader.has_bits(8));
        assert!(!reader.has_bits(9));
        assert_eq!(reader.available_bits(), 8);
    }

    #[test]
    fn test_underflow() {
        let mut reader = PendingBitReader::new();
        reader.push_byte(0xAB);
        reader.read_bits(5).unwrap();

        let err = reader.read_bits(4).unwrap_err();
        assert!(matches!(
            err,
            MppcError::BitstreamUnderflow {
                requested: 4,
                available: 3
            }
        ));
    }

    #[test]
    fn test_oversized_read_is_noop() {
        let mut reader = PendingBitReader::new();
        reader.extend(&[0xFF, 0xFF, 0xFF]);
        assert_eq!(reader.read_bits(17).unwrap(), 0);
        assert_eq!(reader.read_bits(0).unwrap(), 0);
        assert_eq!(reader.available_bits(), 24);
    }

    #[test]
    fn test_discard_partial_byte() {
        let mut reader = PendingBitReader::new();
        reader.extend(&[0xFF, 0x00]);

        assert!(!reader.discard_partial_byte());
        assert_eq!(reader.available_bits(), 16);

        reader.read_bits(3).unwrap();
        assert!(reader.discard_partial_byte());
        assert_eq!(reader.bit_offset(), 0);
        assert_eq!(reader.pending_len(), 1);
        assert_eq!(reader.read_field(8).unwrap(), 0x00);
    }

    #[test]
    fn test_writer_alignment() {
        let mut writer = MsbBitWriter::new();
        assert!(writer.is_aligned());
        writer.write_bit(true);
        assert!(!writer.is_aligned());
        assert_eq!(writer.bits_written(), 1);
        writer.align_to_byte();
        assert!(writer.is_aligned());
        assert_eq!(writer.finish(), vec![0x80]);
    }

    #[test]
    fn test_writer_wide_fields() {
        let mut writer = MsbBitWriter::new();
        writer.write_bits(0xABCD, 16);
        writer.write_bits(0x1_FFFF, 17);
        let data = writer.finish();
        assert_eq!(data, vec![0xAB, 0xCD, 0xFF, 0xFF, 0x80]);
    }
}
