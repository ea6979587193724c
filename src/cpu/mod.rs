//! CPU emulation for the HADLoC computer.
//!
//! This module implements the complete HADLoC architecture:
//! - 32768-byte ROM and 32768-byte RAM
//! - Registers: L, H, PC, X, Y, IN and the IF/CF flags
//! - 6 instruction classes selected by the highest set bit
//! - A table-driven ALU

pub mod alu;
pub mod memory;
pub mod registers;
pub mod decode;
pub mod execute;

pub use alu::{AluOp, ControlWord, OPCODE_MAPPING};
pub use memory::{Memory, MemoryError, MEMORY_SIZE};
pub use registers::{Registers, RegisterSnapshot};
pub use decode::{Instruction, JumpCondition, MoveSource, MoveTarget, OutputMode, OutputSource};
pub use execute::{Cpu, OutputDevice};
