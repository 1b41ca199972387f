//! Fixed-width integer reinterpretation.
//!
//! The bit reader builds its accumulator as an unsigned 32-bit value but
//! extracts fields with a sign-propagating shift on the same bits viewed as
//! signed. These helpers make every crossing between the two views explicit.
//! All of them are bit-preserving: no clamping, only two's-complement
//! reinterpretation or truncation.

/// Reinterpret a signed 32-bit value as unsigned.
#[inline]
pub const fn i32_to_u32(value: i32) -> u32 {
    value as u32
}

/// Reinterpret an unsigned 32-bit value as signed.
#[inline]
pub const fn u32_to_i32(value: u32) -> i32 {
    value as i32
}

/// Zero-extend a byte to 32 bits.
#[inline]
pub const fn u8_to_u32(value: u8) -> u32 {
    value as u32
}

/// Truncate a signed 32-bit value to its low 8 bits.
#[inline]
pub const fn i32_to_u8(value: i32) -> u8 {
    value as u8
}

/// Truncate an unsigned 32-bit value to its low 8 bits.
#[inline]
pub const fn u32_to_u8(value: u32) -> u8 {
    value as u8
}
