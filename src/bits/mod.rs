//! Fixed-width binary primitives.
//!
//! This module provides the value type every other part of the machine is
//! built on:
//! - [`BitWord`] - an unsigned bit vector with a declared width
//! - [`arith`] - carry-aware addition

mod word;
pub mod arith;

pub use word::BitWord;
pub use arith::{add, and, increment};
