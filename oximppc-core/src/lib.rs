//! # OxiMPPC Core
//!
//! Core components for the OxiMPPC stream decoder.
//!
//! This crate provides the building blocks the MPPC decode state machine
//! runs on:
//!
//! - [`cast`]: Bit-preserving reinterpretation between fixed-width integers
//! - [`bitstream`]: MSB-first bit reader over a growing queue of input bytes
//! - [`history`]: Bounded history window serving backward copies
//! - [`traits`]: Streaming decompression trait
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: Surface                                             │
//! │     oximppc CLI, io::Read adapter                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     MPPC decode state machine (oximppc)                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     PendingBitReader, HistoryWindow, casts              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oximppc_core::{HistoryWindow, PendingBitReader};
//!
//! let mut reader = PendingBitReader::new();
//! reader.push_byte(0x41);
//! assert!(reader.has_bits(8));
//! assert_eq!(reader.read_field(1).unwrap(), 0);
//! assert_eq!(reader.read_field(7).unwrap(), 0x41);
//!
//! let mut history = HistoryWindow::new();
//! history.push(b'a');
//! history.push(b'b');
//! let mut out = Vec::new();
//! history.copy_back(2, 5, &mut out);
//! assert_eq!(out, b"ababa");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod cast;
pub mod error;
pub mod history;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{MsbBitWriter, PendingBitReader};
pub use error::{MppcError, Result};
pub use history::HistoryWindow;
pub use traits::{DecompressStatus, Decompressor};
