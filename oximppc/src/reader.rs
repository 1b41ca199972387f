//! `std::io::Read` adapter over a compressed byte source.

use crate::decoder::MppcDecoder;
use std::io::{self, Read};

/// Default number of compressed bytes pulled per refill.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Reader that decodes an MPPC stream pulled from an inner reader.
///
/// # Example
///
/// ```rust
/// use oximppc::MppcReader;
/// use std::io::Read;
///
/// let compressed: &[u8] = &[0b0100_0001]; // literal 'A'
/// let mut reader = MppcReader::new(compressed);
/// let mut out = Vec::new();
/// reader.read_to_end(&mut out).unwrap();
/// assert_eq!(out, b"A");
/// ```
#[derive(Debug)]
pub struct MppcReader<R: Read> {
    inner: R,
    decoder: MppcDecoder,
    /// Compressed input scratch.
    input: Vec<u8>,
    /// Decoded bytes not yet returned.
    decoded: Vec<u8>,
    /// Read position in `decoded`.
    pos: usize,
    eof: bool,
}

impl<R: Read> MppcReader<R> {
    /// Wrap `inner` with a standard decoder.
    pub fn new(inner: R) -> Self {
        Self::with_decoder(inner, MppcDecoder::new())
    }

    /// Wrap `inner` with a caller-configured decoder.
    pub fn with_decoder(inner: R, decoder: MppcDecoder) -> Self {
        Self {
            inner,
            decoder,
            input: vec![0; DEFAULT_CHUNK_SIZE],
            decoded: Vec::new(),
            pos: 0,
            eof: false,
        }
    }

    /// Set how many compressed bytes are read from the inner reader at once.
    ///
    /// A size of zero is treated as one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.input = vec![0; chunk_size.max(1)];
        self
    }

    /// The decoder, for inspecting phase and statistics.
    pub fn decoder(&self) -> &MppcDecoder {
        &self.decoder
    }

    /// Consume the adapter and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Pull and decode compressed chunks until output is available or the
    /// inner reader is exhausted.
    fn refill(&mut self) -> io::Result<()> {
        self.decoded.clear();
        self.pos = 0;

        while self.decoded.is_empty() && !self.eof {
            let n = match self.inner.read(&mut self.input) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if n == 0 {
                self.eof = true;
                break;
            }
            self.decoder
                .update_into(&self.input[..n], &mut self.decoded)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        }
        Ok(())
    }
}

impl<R: Read> Read for MppcReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.pos >= self.decoded.len() {
            self.refill()?;
        }

        let available = &self.decoded[self.pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}
