//! Host-side program tooling.
//!
//! This module provides:
//! - A ROM image loader (raw binary and `0`/`1` text images)
//! - A disassembler (ROM bytes → readable text)

pub mod disasm;
pub mod rom;

pub use disasm::{disassemble, disassemble_instruction};
pub use rom::{load_rom, parse_rom_text, RomError, RomImage};
