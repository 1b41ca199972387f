//! History window (sliding window) for MPPC backward copies.
//!
//! The window keeps the most recently decoded bytes. Its logical length
//! grows with every decoded byte and is cut back by a fixed amount once it
//! reaches a limit; the trim happens once per compressed input byte, before
//! that byte is decoded.
//!
//! Storage is a power-of-two ring buffer. Trimming only shortens the
//! logical length, so discarded bytes are never read again and nothing is
//! moved in memory.

use log::debug;

/// Logical length at which the window is trimmed.
pub const HISTORY_LIMIT: usize = 10240;

/// Bytes removed from the old end on each trim.
pub const HISTORY_DISCARD: usize = 2048;

/// Largest distance an MPPC copy codeword can encode (13-bit field + 0x140).
pub const MAX_COPY_DISTANCE: usize = 0x1FFF + 0x140;

/// Bounded history of decoded bytes.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    /// Ring storage.
    buffer: Vec<u8>,
    /// Next write position in `buffer`.
    position: usize,
    /// Logical length: bytes reachable by a backward copy.
    len: usize,
    /// Mask for ring indexing (capacity - 1).
    mask: usize,
    /// Trim threshold.
    limit: usize,
    /// Bytes dropped per trim.
    discard: usize,
}

impl HistoryWindow {
    /// Create an empty window with the standard MPPC limits.
    pub fn new() -> Self {
        Self::with_prefill(HISTORY_LIMIT, HISTORY_DISCARD, 0)
    }

    /// Create a window with custom limits that starts out holding
    /// `zeros` zero bytes.
    ///
    /// # Panics
    ///
    /// Panics if `discard` is zero or larger than `limit`, or if `zeros`
    /// exceeds `limit`.
    pub fn with_prefill(limit: usize, discard: usize, zeros: usize) -> Self {
        assert!(
            discard > 0 && discard <= limit,
            "discard must be in 1..={}, got {}",
            limit,
            discard
        );
        assert!(zeros <= limit, "prefill {} exceeds limit {}", zeros, limit);

        let capacity = limit.max(MAX_COPY_DISTANCE + 1).next_power_of_two();
        Self {
            buffer: vec![0; capacity],
            position: zeros,
            len: zeros,
            mask: capacity - 1,
            limit,
            discard,
        }
    }

    /// Logical length of the window.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the window holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical ring capacity.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Drop the oldest `discard` bytes if the window has reached its limit.
    ///
    /// Returns `true` if a trim happened.
    pub fn trim_if_full(&mut self) -> bool {
        if self.len < self.limit {
            return false;
        }
        let old = self.len;
        self.len -= self.discard;
        debug!("history trimmed from {} to {} bytes", old, self.len);
        true
    }

    /// Append one byte.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buffer[self.position] = byte;
        self.position = (self.position + 1) & self.mask;
        self.len += 1;
    }

    /// Copy `count` bytes starting `distance` bytes behind the end of the
    /// window, appending each to both the window and `output`.
    ///
    /// Bytes are copied one at a time, so a `count` larger than `distance`
    /// repeats the last `distance` bytes. The copy stops early, without
    /// error, as soon as the source would lie before the start of the
    /// window. Returns the number of bytes copied.
    pub fn copy_back(&mut self, distance: usize, count: usize, output: &mut Vec<u8>) -> usize {
        for copied in 0..count {
            if distance == 0 || distance > self.len || distance > self.buffer.len() {
                return copied;
            }
            let byte = self.buffer[self.position.wrapping_sub(distance) & self.mask];
            self.push(byte);
            output.push(byte);
        }
        count
    }

    /// The last `count` bytes of the window, oldest first.
    pub fn last_bytes(&self, count: usize) -> Vec<u8> {
        let count = count.min(self.len).min(self.buffer.len());
        (0..count)
            .map(|i| self.buffer[self.position.wrapping_sub(count - i) & self.mask])
            .collect()
    }

    /// Empty the window, keeping its limits.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
        self.position = 0;
        self.len = 0;
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new()
    }
}
