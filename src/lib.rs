//! # HADLoC Emulator
//!
//! An emulator of the HADLoC, a small 8-bit instructional computer with a
//! character LCD.
//!
//! The core is a fetch-decode-execute engine over fixed-width [`BitWord`]s
//! and the display's command interpreter. Around it sit a ROM loader, an
//! input parser, a disassembler, a terminal debugger and WebAssembly
//! bindings.

pub mod bits;
pub mod cpu;
pub mod display;
pub mod machine;
pub mod input;
pub mod asm;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use bits::BitWord;
pub use cpu::{Cpu, Instruction, Memory, Registers, OutputDevice};
pub use display::{Display, Grid, Renderer};
pub use machine::Machine;
pub use input::{parse_input, InputError};
pub use asm::{disassemble, load_rom, parse_rom_text, RomError, RomImage};

#[cfg(feature = "tui")]
pub use tui::{run_debugger, run_emulator};
