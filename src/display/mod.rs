//! Character display peripheral.
//!
//! This module provides:
//! - [`Display`] - the LCD controller driven by output instructions
//! - [`Grid`] - the character contents it maintains
//! - [`Renderer`] - the hook front ends use to repaint after each change

mod lcd;
mod render;

pub use lcd::{Display, DisplayCommand, Increment, DEFAULT_COLUMNS, DEFAULT_ROWS};
pub use render::{Grid, LogRenderer, Renderer, BLANK};
