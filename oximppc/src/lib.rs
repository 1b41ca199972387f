//! # OxiMPPC: Pure Rust MPPC Decompression
//!
//! This crate decodes MPPC (Microsoft Point-to-Point Compression) streams:
//! a bit-packed mix of literal bytes and LZ77-style backward copies against
//! a history window of recently decoded bytes.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Streaming**: Feed compressed chunks of any size, including one byte
//!   at a time; a codeword split across chunks is resumed exactly
//! - **Adapters**: [`Decompressor`] slice API and [`MppcReader`] for
//!   `std::io::Read`
//!
//! Only decompression is provided.
//!
//! ## Bitstream
//!
//! - **MSB-first bit order** within and across bytes
//! - **Prefix codes**: `0`/`10` literals, `110`/`1110`/`1111` copies with
//!   13/8/6-bit distance fields
//! - **Unary length**: `0` for length 3, otherwise `k` ones, a zero, and a
//!   `k + 1` bit field
//! - **History**: trimmed by 2048 bytes whenever it reaches 10240
//!
//! ## Example
//!
//! ```rust
//! use oximppc::MppcDecoder;
//!
//! let mut decoder = MppcDecoder::new();
//!
//! // literal 'a', literal 'b', then 1111-000010-0: copy 3 bytes from 2 back
//! let stream = [0x61, 0x62, 0b1111_0000, 0b1000_0000];
//!
//! // The copy codeword straddles the chunk boundary.
//! assert_eq!(decoder.update(&stream[..3]).unwrap(), b"ab");
//! assert_eq!(decoder.update(&stream[3..]).unwrap(), b"aba");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod reader;
mod state;

pub use config::MppcConfig;
pub use decoder::{DecodeStats, MppcDecoder};
pub use oximppc_core::error::{MppcError, Result};
pub use oximppc_core::traits::{DecompressStatus, Decompressor};
pub use reader::{DEFAULT_CHUNK_SIZE, MppcReader};
pub use state::{CodeKind, Phase};

/// Decompress a complete MPPC stream with the standard configuration.
///
/// # Example
///
/// ```rust
/// use oximppc::decompress;
///
/// // literal 'h', literal 'i'
/// let out = decompress(&[0b0110_1000, 0b0110_1001]).unwrap();
/// assert_eq!(out, b"hi");
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    MppcDecoder::new().update(data)
}

/// Decompress a complete MPPC stream with the given configuration.
///
/// # Example
///
/// ```rust
/// use oximppc::{MppcConfig, decompress_with_config};
///
/// // 1111-000001-0: copy 3 bytes from distance 1 before any output
/// let out = decompress_with_config(&[0b1111_0000, 0b0100_0000], MppcConfig::ZERO_PRIMED).unwrap();
/// assert_eq!(out, vec![0, 0, 0]);
/// ```
pub fn decompress_with_config(data: &[u8], config: MppcConfig) -> Result<Vec<u8>> {
    MppcDecoder::with_config(config)?.update(data)
}

/// Decompress a stream delivered as a sequence of chunks.
///
/// The result is the same as decompressing the concatenated chunks.
///
/// # Example
///
/// ```rust
/// use oximppc::{decompress, decompress_chunked};
///
/// let data = [0b0110_1000, 0b0110_1001];
/// let chunks = [&data[..1], &data[1..]];
/// assert_eq!(decompress_chunked(chunks).unwrap(), decompress(&data).unwrap());
/// ```
pub fn decompress_chunked<'a, I>(chunks: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut decoder = MppcDecoder::new();
    let mut output = Vec::new();
    for chunk in chunks {
        decoder.update_into(chunk, &mut output)?;
    }
    Ok(output)
}
