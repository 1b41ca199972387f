//! Core traits for streaming decompression.
//!
//! [`Decompressor`] is the slice-in, slice-out interface: the caller owns
//! both buffers and the decoder reports how far it got. Decoders whose
//! output per input byte is unbounded (an MPPC copy can expand one byte of
//! input into thousands of output bytes) hold the overflow internally and
//! report [`DecompressStatus::NeedsOutput`].

use crate::error::Result;

/// Status of a streaming decompression operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressStatus {
    /// All input was consumed; more input is needed to continue.
    NeedsInput,
    /// The output buffer filled up; call again with more space.
    NeedsOutput,
}

/// A streaming decompressor (decoder).
pub trait Decompressor {
    /// Decompress data from input to output.
    ///
    /// # Arguments
    ///
    /// * `input` - Input compressed data
    /// * `output` - Output buffer for decompressed data
    ///
    /// # Returns
    ///
    /// A tuple of (bytes consumed from input, bytes written to output, status)
    fn decompress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(usize, usize, DecompressStatus)>;

    /// Reset the decompressor to its initial state.
    fn reset(&mut self);

    /// Check if the decompressor has finished.
    fn is_finished(&self) -> bool;

    /// Decompress all data at once (convenience method).
    fn decompress_all(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut input_pos = 0;
        let mut buffer = vec![0u8; 32768];

        loop {
            let (consumed, produced, status) = self.decompress(&input[input_pos..], &mut buffer)?;

            input_pos += consumed;
            output.extend_from_slice(&buffer[..produced]);

            if status == DecompressStatus::NeedsInput && input_pos >= input.len() {
                break;
            }
        }

        Ok(output)
    }
}
