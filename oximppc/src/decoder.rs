//! MPPC decoder (decompression).
//!
//! The decoder is fed compressed bytes one at a time. After each byte it
//! runs the state machine until the next field it needs is not fully
//! available, then suspends; the suspended phase is resumed by the next
//! byte, so chunk boundaries never change the output.
//!
//! # Codewords
//!
//! ```text
//! 0    + 7 bits              literal 0x00-0x7F
//! 10   + 7 bits              literal 0x80-0xFF
//! 110  + 13 bits + length    copy, distance = field + 0x140
//! 1110 + 8 bits  + length    copy, distance = field + 0x40
//! 1111 + 6 bits  + length    copy, distance = field (0 = alignment marker)
//! ```
//!
//! The copy length is a unary count `k` of `1` bits terminated by `0`.
//! `k == 0` means length 3; otherwise a `k + 1` bit field `v` follows and
//! the length is `v + 2^(k + 1)`.

use crate::config::MppcConfig;
use crate::state::{CodeKind, Phase};
use log::{debug, trace};
use oximppc_core::bitstream::{MAX_READ_BITS, PendingBitReader};
use oximppc_core::cast::u32_to_u8;
use oximppc_core::error::{MppcError, Result};
use oximppc_core::history::HistoryWindow;
use oximppc_core::traits::{DecompressStatus, Decompressor};

/// Bits that must be pending before a prefix is decoded.
const PREFIX_BITS: u32 = 4;

/// Copy length when no length flags are set.
const MIN_COPY_LENGTH: usize = 3;

/// Most `1` length flags whose field still fits in one read.
const MAX_LENGTH_EXP: u32 = MAX_READ_BITS - 1;

/// Counters collected while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Compressed bytes consumed.
    pub input_bytes: u64,
    /// Decoded bytes produced.
    pub output_bytes: u64,
    /// Literal codewords decoded.
    pub literals: u64,
    /// Copy codewords executed.
    pub copies: u64,
    /// Bytes produced by copies.
    pub copied_bytes: u64,
    /// Copies cut short because the source lay before the history start.
    pub truncated_copies: u64,
    /// Zero-distance alignment markers seen.
    pub alignment_resets: u64,
    /// History trims performed.
    pub history_trims: u64,
}

/// Streaming MPPC decoder for one compressed stream.
#[derive(Debug)]
pub struct MppcDecoder {
    /// Configuration the decoder was built with.
    config: MppcConfig,
    /// Pending compressed bits.
    reader: PendingBitReader,
    /// Decoded history for backward copies.
    history: HistoryWindow,
    /// Current state machine phase.
    phase: Phase,
    /// Decode counters.
    stats: DecodeStats,
    /// Input bit position where the current codeword started.
    codeword_start: u64,
    /// Set once a call fails; the state is then unusable.
    failed: bool,
    /// Output decoded through [`Decompressor`] that did not fit yet.
    spill: Vec<u8>,
    /// Bytes of `spill` already handed out.
    spill_pos: usize,
}

impl MppcDecoder {
    /// Create a decoder with [`MppcConfig::STANDARD`].
    pub fn new() -> Self {
        Self::build(MppcConfig::STANDARD)
    }

    /// Create a decoder with the given configuration.
    pub fn with_config(config: MppcConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MppcConfig) -> Self {
        Self {
            config,
            reader: PendingBitReader::new(),
            history: HistoryWindow::with_prefill(
                config.history_limit,
                config.history_discard,
                config.zero_prefill,
            ),
            phase: Phase::ReadPrefix,
            stats: DecodeStats::default(),
            codeword_start: 0,
            failed: false,
            spill: Vec::new(),
            spill_pos: 0,
        }
    }

    /// Decode one chunk of compressed input.
    ///
    /// Returns exactly the bytes decoded from this chunk. A codeword cut
    /// off at the end of the chunk is completed by the next call.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oximppc::MppcDecoder;
    ///
    /// let mut decoder = MppcDecoder::new();
    /// // 0-1000001: literal 'A'
    /// assert_eq!(decoder.update(&[0b0100_0001]).unwrap(), b"A");
    /// ```
    pub fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(chunk.len() * 2);
        self.update_into(chunk, &mut output)?;
        Ok(output)
    }

    /// Decode one chunk, appending the decoded bytes to `output`.
    ///
    /// Returns the number of bytes appended.
    pub fn update_into(&mut self, chunk: &[u8], output: &mut Vec<u8>) -> Result<usize> {
        if self.failed {
            return Err(MppcError::DecoderFailed);
        }

        let start = output.len();
        if self.spill_pos < self.spill.len() {
            output.extend_from_slice(&self.spill[self.spill_pos..]);
            self.spill.clear();
            self.spill_pos = 0;
        }

        for &byte in chunk {
            self.decode_byte(byte, output)?;
        }

        Ok(output.len() - start)
    }

    /// Return to the freshly constructed state, keeping the configuration.
    pub fn reset(&mut self) {
        *self = Self::build(self.config);
    }

    /// The configuration in use.
    pub fn config(&self) -> &MppcConfig {
        &self.config
    }

    /// Current state machine phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the input seen so far ends between codewords.
    ///
    /// True when the decoder waits for a prefix, or when everything read
    /// since the last completed codeword fits in the final partial byte.
    /// The latter is end-of-stream padding: four or more zero pad bits
    /// already select a literal prefix that can never complete.
    pub fn is_at_codeword_boundary(&self) -> bool {
        self.phase == Phase::ReadPrefix || self.received_bits() - self.codeword_start < 8
    }

    /// Compressed bits received but not yet consumed.
    pub fn pending_bits(&self) -> usize {
        self.reader.available_bits()
    }

    /// Current logical history length.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Decode counters so far.
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Whether an earlier call failed.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    fn received_bits(&self) -> u64 {
        self.stats.input_bytes * 8
    }

    fn consumed_bits(&self) -> u64 {
        self.received_bits() - self.reader.available_bits() as u64
    }

    fn decode_byte(&mut self, byte: u8, output: &mut Vec<u8>) -> Result<()> {
        self.reader.push_byte(byte);
        self.stats.input_bytes += 1;

        if self.history.trim_if_full() {
            self.stats.history_trims += 1;
        }

        let before = output.len();
        let result = self.run(output);
        self.stats.output_bytes += (output.len() - before) as u64;

        if result.is_err() {
            self.failed = true;
        }
        result
    }

    /// Advance phases until the next one lacks input.
    fn run(&mut self, output: &mut Vec<u8>) -> Result<()> {
        while let Some(next) = self.step(output)? {
            if next == Phase::ReadPrefix {
                self.codeword_start = self.consumed_bits();
            }
            self.phase = next;
        }
        Ok(())
    }

    /// Run the current phase once.
    ///
    /// Returns the next phase, or `None` to suspend without consuming.
    fn step(&mut self, output: &mut Vec<u8>) -> Result<Option<Phase>> {
        let next = match self.phase {
            Phase::ReadPrefix => {
                if !self.reader.has_bits(PREFIX_BITS) {
                    return Ok(None);
                }
                Phase::ReadField(self.read_prefix()?)
            }

            Phase::ReadField(kind) => {
                let width = kind.field_bits();
                if !self.reader.has_bits(width) {
                    return Ok(None);
                }
                let value = self.reader.read_field(width)?;
                match kind {
                    CodeKind::LiteralLow => {
                        self.emit_literal(u32_to_u8(value), output);
                        Phase::ReadPrefix
                    }
                    CodeKind::LiteralHigh => {
                        self.emit_literal(u32_to_u8(value | 0x80), output);
                        Phase::ReadPrefix
                    }
                    CodeKind::CopyLong | CodeKind::CopyMedium | CodeKind::CopyShort => {
                        Phase::CheckDistance {
                            distance: value as usize + kind.distance_base(),
                        }
                    }
                }
            }

            Phase::CheckDistance { distance: 0 } => {
                // Alignment marker: skip to the next byte boundary.
                let discarded = self.reader.discard_partial_byte();
                self.stats.alignment_resets += 1;
                debug!(
                    "zero-distance marker after {} input bytes (partial byte dropped: {})",
                    self.stats.input_bytes, discarded
                );
                Phase::ReadPrefix
            }

            Phase::CheckDistance { distance } => Phase::ReadLengthFlags {
                distance,
                length_exp: 0,
            },

            Phase::ReadLengthFlags {
                distance,
                length_exp,
            } => {
                if !self.reader.has_bits(1) {
                    return Ok(None);
                }
                if self.reader.read_bit()? {
                    let length_exp = length_exp + 1;
                    if length_exp > MAX_LENGTH_EXP {
                        return Err(MppcError::length_overflow(length_exp, MAX_LENGTH_EXP));
                    }
                    Phase::ReadLengthFlags {
                        distance,
                        length_exp,
                    }
                } else {
                    Phase::EmitCopy {
                        distance,
                        length_exp,
                    }
                }
            }

            Phase::EmitCopy {
                distance,
                length_exp,
            } => {
                let length = if length_exp == 0 {
                    MIN_COPY_LENGTH
                } else {
                    let width = length_exp + 1;
                    if !self.reader.has_bits(width) {
                        return Ok(None);
                    }
                    self.reader.read_field(width)? as usize + (1usize << width)
                };
                self.emit_copy(distance, length, output);
                Phase::ReadPrefix
            }
        };

        Ok(Some(next))
    }

    /// Classify the next codeword from up to four prefix bits.
    fn read_prefix(&mut self) -> Result<CodeKind> {
        let kind = if !self.reader.read_bit()? {
            CodeKind::LiteralLow
        } else if !self.reader.read_bit()? {
            CodeKind::LiteralHigh
        } else if !self.reader.read_bit()? {
            CodeKind::CopyLong
        } else if !self.reader.read_bit()? {
            CodeKind::CopyMedium
        } else {
            CodeKind::CopyShort
        };
        Ok(kind)
    }

    fn emit_literal(&mut self, byte: u8, output: &mut Vec<u8>) {
        trace!("literal {:#04x}", byte);
        self.history.push(byte);
        output.push(byte);
        self.stats.literals += 1;
    }

    fn emit_copy(&mut self, distance: usize, length: usize, output: &mut Vec<u8>) {
        trace!("copy distance={} length={}", distance, length);
        let copied = self.history.copy_back(distance, length, output);
        self.stats.copies += 1;
        self.stats.copied_bytes += copied as u64;

        if copied < length {
            self.stats.truncated_copies += 1;
            debug!(
                "copy truncated: distance {} beyond history of {} bytes ({} of {} copied)",
                distance,
                self.history.len(),
                copied,
                length
            );
        }
    }

    /// Move spilled output into `output`; returns bytes moved.
    fn drain_spill(&mut self, output: &mut [u8]) -> usize {
        let remaining = &self.spill[self.spill_pos..];
        let n = remaining.len().min(output.len());
        output[..n].copy_from_slice(&remaining[..n]);
        self.spill_pos += n;

        if self.spill_pos == self.spill.len() {
            self.spill.clear();
            self.spill_pos = 0;
        }
        n
    }
}

impl Default for MppcDecoder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Decompressor Trait Implementation
// ============================================================================

impl Decompressor for MppcDecoder {
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(usize, usize, DecompressStatus)> {
        if self.failed {
            return Err(MppcError::DecoderFailed);
        }

        let mut produced = self.drain_spill(output);
        let mut consumed = 0;

        while produced < output.len() && consumed < input.len() {
            let mut spill = std::mem::take(&mut self.spill);
            let result = self.decode_byte(input[consumed], &mut spill);
            self.spill = spill;
            result?;

            consumed += 1;
            produced += self.drain_spill(&mut output[produced..]);
        }

        let status = if self.spill_pos < self.spill.len() || consumed < input.len() {
            DecompressStatus::NeedsOutput
        } else {
            DecompressStatus::NeedsInput
        };

        Ok((consumed, produced, status))
    }

    fn reset(&mut self) {
        MppcDecoder::reset(self);
    }

    /// MPPC streams carry no end marker.
    fn is_finished(&self) -> bool {
        false
    }
}
