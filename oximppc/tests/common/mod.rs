//! Shared helpers for building MPPC streams in tests.
//!
//! `StreamBuilder` writes individual codewords; `encode_greedy` is a naive
//! LZ77 matcher on top of it, good enough to produce realistic streams for
//! decoder tests.

#![allow(dead_code)]

use oximppc_core::bitstream::MsbBitWriter;
use std::collections::HashMap;

/// Largest distance the greedy matcher uses. The decoder never trims its
/// history below this many bytes once it has seen them.
pub const SAFE_DISTANCE: usize = 8192;

/// Longest copy the greedy matcher emits.
pub const MAX_MATCH: usize = 8191;

/// Codeword-level MPPC stream writer.
#[derive(Default)]
pub struct StreamBuilder {
    writer: MsbBitWriter,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn literal(&mut self, byte: u8) -> &mut Self {
        if byte < 0x80 {
            self.writer.write_bits(0, 1);
        } else {
            self.writer.write_bits(0b10, 2);
        }
        self.writer.write_bits(u32::from(byte & 0x7F), 7);
        self
    }

    pub fn literals(&mut self, bytes: &[u8]) -> &mut Self {
        for &b in bytes {
            self.literal(b);
        }
        self
    }

    /// Copy `length` bytes from `distance` back.
    ///
    /// Panics on a distance or length the format cannot express.
    pub fn copy(&mut self, distance: usize, length: usize) -> &mut Self {
        assert!(distance >= 1, "distance 0 is the alignment marker");
        if distance < 0x40 {
            self.writer.write_bits(0b1111, 4);
            self.writer.write_bits(distance as u32, 6);
        } else if distance < 0x140 {
            self.writer.write_bits(0b1110, 4);
            self.writer.write_bits((distance - 0x40) as u32, 8);
        } else {
            assert!(distance <= 0x1FFF + 0x140, "distance {} too large", distance);
            self.writer.write_bits(0b110, 3);
            self.writer.write_bits((distance - 0x140) as u32, 13);
        }
        self.length(length);
        self
    }

    fn length(&mut self, length: usize) {
        assert!(length >= 3, "length {} too small", length);
        if length == 3 {
            self.writer.write_bits(0, 1);
            return;
        }
        let width = length.ilog2();
        assert!(width <= 16, "length {} too large", length);
        let ones = width - 1;
        self.writer.write_bits((1u32 << ones) - 1, ones);
        self.writer.write_bits(0, 1);
        self.writer.write_bits((length - (1 << width)) as u32, width);
    }

    /// Zero-distance marker followed by padding to the next byte.
    pub fn alignment_marker(&mut self) -> &mut Self {
        self.writer.write_bits(0b1111, 4);
        self.writer.write_bits(0, 6);
        self.writer.align_to_byte();
        self
    }

    /// Raw bits, for malformed streams.
    pub fn raw_bits(&mut self, value: u32, count: u32) -> &mut Self {
        self.writer.write_bits(value, count);
        self
    }

    pub fn bits_written(&self) -> u64 {
        self.writer.bits_written()
    }

    pub fn finish(self) -> Vec<u8> {
        self.writer.finish()
    }
}

/// Greedy LZ77 encoding of `data` into an MPPC stream.
pub fn encode_greedy(data: &[u8]) -> Vec<u8> {
    let mut builder = StreamBuilder::new();
    let mut last_seen: HashMap<[u8; 3], usize> = HashMap::new();
    let mut pos = 0;

    while pos < data.len() {
        let mut best = None;
        if pos + 3 <= data.len() {
            let key = [data[pos], data[pos + 1], data[pos + 2]];
            if let Some(&candidate) = last_seen.get(&key) {
                let distance = pos - candidate;
                if distance <= SAFE_DISTANCE {
                    let mut len = 0;
                    while pos + len < data.len()
                        && len < MAX_MATCH
                        && data[candidate + len] == data[pos + len]
                    {
                        len += 1;
                    }
                    if len >= 3 {
                        best = Some((distance, len));
                    }
                }
            }
        }

        let advance = match best {
            Some((distance, len)) => {
                builder.copy(distance, len);
                len
            }
            None => {
                builder.literal(data[pos]);
                1
            }
        };

        for p in pos..pos + advance {
            if p + 3 <= data.len() {
                last_seen.insert([data[p], data[p + 1], data[p + 2]], p);
            }
        }
        pos += advance;
    }

    builder.finish()
}

/// Reproducible pseudo-random bytes.
pub fn random_bytes(size: usize, mut seed: u64) -> Vec<u8> {
    (0..size)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 33) as u8
        })
        .collect()
}

/// Text with plenty of repetition at varying distances.
pub fn sample_text(size: usize) -> Vec<u8> {
    let words: [&[u8]; 8] = [
        b"point ", b"to ", b"point ", b"compression ", b"history ", b"window ", b"copy ",
        b"literal ",
    ];
    let mut seed: u64 = 0x9E3779B97F4A7C15;
    let mut out = Vec::with_capacity(size);
    while out.len() < size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let word = words[(seed >> 61) as usize];
        out.extend_from_slice(word);
        if (seed >> 20) % 17 == 0 {
            out.extend_from_slice(format!("{} ", seed % 1000).as_bytes());
        }
    }
    out.truncate(size);
    out
}

/// Split `data` at pseudo-random points into chunks of 1..=max_chunk bytes.
pub fn split_chunks(data: &[u8], max_chunk: usize, mut seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let n = ((seed >> 33) as usize % max_chunk + 1).min(rest.len());
        let (head, tail) = rest.split_at(n);
        chunks.push(head);
        rest = tail;
    }
    chunks
}
