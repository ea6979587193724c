//! Fixed-width unsigned bit vectors.
//!
//! Every register, memory cell and instruction in the HADLoC is a
//! [`BitWord`]: an unsigned magnitude paired with a declared width.
//! Values are masked to their width on construction, so arithmetic wraps
//! silently the way the hardware does.

use std::fmt;
use std::ops::{BitAnd, Not};
use serde::Serialize;

/// A fixed-width unsigned bit vector.
///
/// The magnitude is always in `[0, 2^width)`. Bit 0 is the least
/// significant bit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BitWord {
    value: u32,
    width: u8,
}

// ============================================================================
// Construction and access
// ============================================================================

impl BitWord {
    /// Widest word the type can hold.
    pub const MAX_WIDTH: u32 = 32;

    /// Create a word, masking `value` to `width` bits.
    ///
    /// # Panics
    /// Panics if `width` is outside `1..=32`.
    #[inline]
    pub fn new(value: u32, width: u32) -> Self {
        assert!(
            width >= 1 && width <= Self::MAX_WIDTH,
            "BitWord width {} out of range [1, {}]",
            width, Self::MAX_WIDTH
        );
        Self {
            value: value & Self::mask(width),
            width: width as u8,
        }
    }

    /// Create an all-zero word of the given width.
    #[inline]
    pub fn zero(width: u32) -> Self {
        Self::new(0, width)
    }

    /// Bit mask covering `width` low bits.
    #[inline]
    pub const fn mask(width: u32) -> u32 {
        if width >= 32 {
            u32::MAX
        } else {
            (1 << width) - 1
        }
    }

    /// The unsigned magnitude.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// The declared width in bits.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width as u32
    }

    /// Low 8 bits of the magnitude.
    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.value as u8
    }

    /// Check if every bit is clear.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Check if a single bit is set.
    ///
    /// # Panics
    /// Panics if `index` is outside the width.
    #[inline]
    pub fn is_set(&self, index: u32) -> bool {
        assert!(index < self.width(), "bit {} out of range for {}-bit word", index, self.width);
        (self.value >> index) & 1 == 1
    }

    /// Read a single bit as a 1-bit word.
    pub fn bit(&self, index: u32) -> Self {
        Self::new(self.is_set(index) as u32, 1)
    }

    /// Extract bits `[start, end)` as a narrower word.
    ///
    /// # Panics
    /// Panics unless `start < end <= width`.
    pub fn slice(&self, start: u32, end: u32) -> Self {
        assert!(
            start < end && end <= self.width(),
            "slice [{}, {}) out of range for {}-bit word",
            start, end, self.width
        );
        Self::new(self.value >> start, end - start)
    }

    /// Concatenate with `low`, placing `self` in the high-order bits.
    ///
    /// The result is `self.width + low.width` bits wide.
    pub fn concat(&self, low: BitWord) -> Self {
        let width = self.width() + low.width();
        assert!(width <= Self::MAX_WIDTH, "concatenation of {} bits exceeds {}", width, Self::MAX_WIDTH);
        Self::new((self.value << low.width()) | low.value, width)
    }

    /// Truncate or zero-extend to a new width.
    pub fn resize(&self, width: u32) -> Self {
        Self::new(self.value, width)
    }

    /// Add `other`, wrapping to this word's width.
    ///
    /// Returns the wrapped sum and whether a carry left the top bit.
    pub fn overflowing_add(&self, other: BitWord) -> (Self, bool) {
        let sum = self.value as u64 + other.value as u64;
        let carry = sum >> self.width() != 0;
        (Self::new(sum as u32, self.width()), carry)
    }

    /// Position of the highest set bit, or `None` for zero.
    #[inline]
    pub fn msb(&self) -> Option<u32> {
        if self.value == 0 {
            None
        } else {
            Some(31 - self.value.leading_zeros())
        }
    }

    /// Check the top bit, i.e. the sign under a two's-complement reading.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.is_set(self.width() - 1)
    }
}

impl Default for BitWord {
    fn default() -> Self {
        Self::zero(8)
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Not for BitWord {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::new(!self.value, self.width())
    }
}

impl BitAnd for BitWord {
    type Output = Self;

    /// Bitwise AND, keeping the width of the left operand.
    fn bitand(self, rhs: Self) -> Self::Output {
        Self::new(self.value & rhs.value, self.width())
    }
}

impl PartialEq<u32> for BitWord {
    fn eq(&self, other: &u32) -> bool {
        self.value == *other
    }
}

impl From<u8> for BitWord {
    fn from(byte: u8) -> Self {
        Self::new(byte as u32, 8)
    }
}

impl From<bool> for BitWord {
    fn from(bit: bool) -> Self {
        Self::new(bit as u32, 1)
    }
}

impl fmt::Debug for BitWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitWord<{}>(0b{:0width$b} = {})", self.width, self.value, self.value, width = self.width() as usize)
    }
}

impl fmt::Display for BitWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.width() as usize)
    }
}

// ============================================================================
// Tests
// ============================================================================
