//! Decode state machine phases and codeword classes.
//!
//! Each phase carries exactly the data it needs, so a suspended decoder
//! resumes with no stale fields from an earlier codeword.

/// Codeword class selected by the prefix bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// `0` + 7 bits: literal byte 0x00-0x7F.
    LiteralLow,
    /// `10` + 7 bits: literal byte 0x80-0xFF.
    LiteralHigh,
    /// `110` + 13 bits: copy distance 0x140 and up.
    CopyLong,
    /// `1110` + 8 bits: copy distance 0x40-0x13F.
    CopyMedium,
    /// `1111` + 6 bits: copy distance 0x00-0x3F.
    CopyShort,
}

impl CodeKind {
    /// Width of the field following the prefix.
    pub const fn field_bits(self) -> u32 {
        match self {
            Self::LiteralLow | Self::LiteralHigh => 7,
            Self::CopyLong => 13,
            Self::CopyMedium => 8,
            Self::CopyShort => 6,
        }
    }

    /// Value added to a copy field to form the distance.
    pub const fn distance_base(self) -> usize {
        match self {
            Self::CopyLong => 0x140,
            Self::CopyMedium => 0x40,
            Self::LiteralLow | Self::LiteralHigh | Self::CopyShort => 0,
        }
    }
}

/// Decoder phase between input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the next codeword prefix.
    #[default]
    ReadPrefix,
    /// Prefix decoded; the field of this class comes next.
    ReadField(CodeKind),
    /// Copy distance decoded; zero means an alignment marker.
    CheckDistance {
        /// Backward distance.
        distance: usize,
    },
    /// Reading unary length flags.
    ReadLengthFlags {
        /// Backward distance.
        distance: usize,
        /// `1` flags seen so far.
        length_exp: u32,
    },
    /// Flags done; read the length field (if any) and copy.
    EmitCopy {
        /// Backward distance.
        distance: usize,
        /// Number of `1` length flags.
        length_exp: u32,
    },
}
