//! Command implementations for OxiMPPC CLI.

pub mod decompress;
pub mod stats;

pub use decompress::cmd_decompress;
pub use stats::cmd_stats;

use oximppc::{MppcConfig, MppcDecoder};

/// Decoder settings shared by all commands.
pub struct DecodeOptions {
    /// Compressed bytes fed to the decoder per update.
    pub chunk_size: usize,
    /// Start from a zero-filled history window.
    pub zero_primed: bool,
}

impl DecodeOptions {
    /// Build a decoder for these settings.
    pub fn decoder(&self) -> oximppc::Result<MppcDecoder> {
        let config = if self.zero_primed {
            MppcConfig::ZERO_PRIMED
        } else {
            MppcConfig::STANDARD
        };
        MppcDecoder::with_config(config)
    }
}
