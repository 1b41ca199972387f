//! Error types for OxiMPPC operations.
//!
//! Running out of input in the middle of a codeword is not an error: the
//! decoder simply suspends until more bytes arrive. The variants here cover
//! corrupted copy lengths, rejected configuration and broken internal
//! invariants, plus I/O failures from the adapters built on the decoder.

use std::io;
use thiserror::Error;

/// The main error type for OxiMPPC operations.
#[derive(Debug, Error)]
pub enum MppcError {
    /// A bit field was read while fewer bits than requested were pending.
    ///
    /// The decoder always checks availability before reading, so this
    /// signals a broken internal invariant. The decoder state is undefined
    /// afterwards and the stream must be treated as corrupted.
    #[error("Bitstream underflow: requested {requested} bits, {available} available")]
    BitstreamUnderflow {
        /// Number of bits requested.
        requested: u32,
        /// Number of bits that were pending.
        available: usize,
    },

    /// A copy length prefix asked for a field wider than can be read.
    ///
    /// Only a corrupted stream produces this; the decoder cannot resync.
    #[error("Copy length prefix too long: {length_exp} extension bits (max {max})")]
    LengthOverflow {
        /// Number of `1` length flags read.
        length_exp: u32,
        /// Largest supported number of flags.
        max: u32,
    },

    /// Decoder configuration was rejected.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the rejected setting.
        message: String,
    },

    /// The decoder failed earlier and must be reset before reuse.
    #[error("Decoder is in a failed state; reset it or discard the stream")]
    DecoderFailed,

    /// I/O error from an underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for OxiMPPC operations.
pub type Result<T> = std::result::Result<T, MppcError>;

impl MppcError {
    /// Create a bitstream underflow error.
    pub fn underflow(requested: u32, available: usize) -> Self {
        Self::BitstreamUnderflow {
            requested,
            available,
        }
    }

    /// Create a length overflow error.
    pub fn length_overflow(length_exp: u32, max: u32) -> Self {
        Self::LengthOverflow { length_exp, max }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
