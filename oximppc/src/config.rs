//! MPPC decoder configuration.

use oximppc_core::error::{MppcError, Result};
use oximppc_core::history::{HISTORY_DISCARD, HISTORY_LIMIT, MAX_COPY_DISTANCE};

/// MPPC decoder configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MppcConfig {
    /// History length at which the oldest bytes are discarded.
    pub history_limit: usize,
    /// Number of bytes discarded per trim.
    pub history_discard: usize,
    /// Number of zero bytes the history starts with.
    pub zero_prefill: usize,
}

impl MppcConfig {
    /// Standard configuration.
    ///
    /// - Trim at 10240 bytes, discarding 2048
    /// - Empty initial history: copies before any output are truncated
    pub const STANDARD: Self = Self {
        history_limit: HISTORY_LIMIT,
        history_discard: HISTORY_DISCARD,
        zero_prefill: 0,
    };

    /// Standard limits with 8 KiB of zeros preloaded into the history.
    ///
    /// Some peers expect copies issued before any literal to read zeros.
    pub const ZERO_PRIMED: Self = Self {
        history_limit: HISTORY_LIMIT,
        history_discard: HISTORY_DISCARD,
        zero_prefill: 8 * 1024,
    };

    /// Check that the parameters describe a usable history window.
    pub fn validate(&self) -> Result<()> {
        if self.history_discard == 0 {
            return Err(MppcError::invalid_config("history_discard must be non-zero"));
        }
        if self.history_discard > self.history_limit {
            return Err(MppcError::invalid_config(format!(
                "history_discard ({}) exceeds history_limit ({})",
                self.history_discard, self.history_limit
            )));
        }
        if self.history_limit <= MAX_COPY_DISTANCE {
            return Err(MppcError::invalid_config(format!(
                "history_limit ({}) must exceed the maximum copy distance ({})",
                self.history_limit, MAX_COPY_DISTANCE
            )));
        }
        if self.zero_prefill > self.history_limit {
            return Err(MppcError::invalid_config(format!(
                "zero_prefill ({}) exceeds history_limit ({})",
                self.zero_prefill, self.history_limit
            )));
        }
        Ok(())
    }
}

impl Default for MppcConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}
