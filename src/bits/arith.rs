//! Word-level arithmetic helpers.
//!
//! Thin wrappers over [`BitWord`] used by the ALU and the carry adjust.

use crate::bits::BitWord;

/// Add two words, returning (result, carry_out).
///
/// The result takes the width of `a`.
#[inline]
pub fn add(a: BitWord, b: BitWord) -> (BitWord, bool) {
    a.overflowing_add(b)
}

/// Add one to a word, returning (result, carry_out).
#[inline]
pub fn increment(a: BitWord) -> (BitWord, bool) {
    a.overflowing_add(BitWord::new(1, 1))
}

/// Bitwise AND of two words.
#[inline]
pub fn and(a: BitWord, b: BitWord) -> BitWord {
    a & b
}
