//! HADLoC CPU registers.
//!
//! The HADLoC has 6 data registers and 2 flags:
//! - L: 8-bit general register, low byte of the memory/jump address
//! - H: 7-bit high part of the 15-bit address
//! - PC: 15-bit program counter
//! - X: 8-bit accumulator
//! - Y: 8-bit secondary register
//! - IN: 8-bit external input register
//! - IF: input-ready flag
//! - CF: carry flag

use crate::bits::{self, BitWord};
use log::trace;
use serde::Serialize;

/// Width of data registers, memory cells and instructions.
pub const WORD_WIDTH: u32 = 8;

/// Width of the H register.
pub const HIGH_WIDTH: u32 = 7;

/// Width of the program counter and of `H:L` addresses.
pub const ADDRESS_WIDTH: u32 = HIGH_WIDTH + WORD_WIDTH;

/// The HADLoC register file.
#[derive(Clone, Debug)]
pub struct Registers {
    /// L: general register and low address byte
    pub l: BitWord,

    /// H: high address bits
    pub h: BitWord,

    /// PC: program counter
    pub pc: BitWord,

    /// X: accumulator
    pub x: BitWord,

    /// Y: secondary register
    pub y: BitWord,

    /// IN: value supplied by the input collaborator
    pub input: BitWord,

    /// IF: set when `input` holds unread data
    pub input_ready: bool,

    /// CF: carry out of the last additive ALU operation
    pub carry: bool,
}

impl Registers {
    /// Create a new register file with all values zeroed.
    pub fn new() -> Self {
        Self {
            l: BitWord::zero(WORD_WIDTH),
            h: BitWord::zero(HIGH_WIDTH),
            pc: BitWord::zero(ADDRESS_WIDTH),
            x: BitWord::zero(WORD_WIDTH),
            y: BitWord::zero(WORD_WIDTH),
            input: BitWord::zero(WORD_WIDTH),
            input_ready: false,
            carry: false,
        }
    }

    /// Increment the program counter by 1, wrapping at 15 bits.
    /// Returns the old value.
    pub fn advance_pc(&mut self) -> BitWord {
        let old = self.pc;
        self.pc = bits::increment(self.pc).0;
        old
    }

    /// Set the program counter to an absolute address.
    pub fn jump(&mut self, addr: BitWord) {
        trace!("Reg: jump to {:#06x}", addr.value());
        self.pc = addr.resize(ADDRESS_WIDTH);
    }

    /// The 15-bit address formed by `H:L`.
    pub fn address(&self) -> BitWord {
        self.h.concat(self.l)
    }

    /// Write L.
    pub fn set_l(&mut self, value: BitWord) {
        trace!("Reg: writing {:#04x} to L", value.value());
        self.l = value.resize(WORD_WIDTH);
    }

    /// Write H, keeping only its low 7 bits.
    pub fn set_h(&mut self, value: BitWord) {
        trace!("Reg: writing {:#04x} to H", value.value());
        self.h = value.resize(HIGH_WIDTH);
    }

    /// Write X.
    pub fn set_x(&mut self, value: BitWord) {
        trace!("Reg: writing {:#04x} to X", value.value());
        self.x = value.resize(WORD_WIDTH);
    }

    /// Write Y.
    pub fn set_y(&mut self, value: BitWord) {
        trace!("Reg: writing {:#04x} to Y", value.value());
        self.y = value.resize(WORD_WIDTH);
    }

    /// Read IN and clear IF.
    pub fn take_input(&mut self) -> BitWord {
        self.input_ready = false;
        self.input
    }

    /// Latch a new input value and raise IF.
    pub fn latch_input(&mut self, value: u8) {
        self.input = BitWord::from(value);
        self.input_ready = true;
    }

    /// Capture a plain-integer view of the registers.
    pub fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            l: self.l.value() as u8,
            h: self.h.value() as u8,
            pc: self.pc.value() as u16,
            x: self.x.value() as u8,
            y: self.y.value() as u8,
            input: self.input.value() as u8,
            input_ready: self.input_ready,
            carry: self.carry,
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

/// Register values as plain integers, for front ends and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegisterSnapshot {
    pub l: u8,
    pub h: u8,
    pub pc: u16,
    pub x: u8,
    pub y: u8,
    #[serde(rename = "in")]
    pub input: u8,
    #[serde(rename = "if")]
    pub input_ready: bool,
    #[serde(rename = "cf")]
    pub carry: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        let regs = Registers::new();
        assert_eq!(regs.l.width(), 8);
        assert_eq!(regs.h.width(), 7);
        assert_eq!(regs.pc.width(), 15);
        assert_eq!(regs.address().width(), 15);
    }

    #[test]
    fn test_advance_pc() {
        let mut regs = Registers::new();
        regs.pc = BitWord::new(10, ADDRESS_WIDTH);

        let old = regs.advance_pc();
        assert_eq!(old.value(), 10);
        assert_eq!(regs.pc.value(), 11);
    }

    #[test]
    fn test_advance_pc_wraps() {
        let mut regs = Registers::new();
        regs.pc = BitWord::new(0x7FFF, ADDRESS_WIDTH);
        regs.advance_pc();
        assert_eq!(regs.pc.value(), 0);
    }

    #[test]
    fn test_set_h_truncates() {
        let mut regs = Registers::new();
        regs.set_h(BitWord::new(0xFF, WORD_WIDTH));
        assert_eq!(regs.h.value(), 0x7F);
        assert_eq!(regs.h.width(), 7);
    }

    #[test]
    fn test_address() {
        let mut regs = Registers::new();
        regs.set_h(BitWord::new(0x12, WORD_WIDTH));
        regs.set_l(BitWord::new(0x34, WORD_WIDTH));
        assert_eq!(regs.address().value(), 0x1234);
    }

    #[test]
    fn test_input_flag() {
        let mut regs = Registers::new();
        regs.latch_input(b'q');
        assert!(regs.input_ready);

        let value = regs.take_input();
        assert_eq!(value.value(), b'q' as u32);
        assert!(!regs.input_ready);
    }

    #[test]
    fn test_snapshot_json_names() {
        let mut regs = Registers::new();
        regs.latch_input(7);
        let json = serde_json::to_string(&regs.snapshot()).unwrap();
        assert!(json.contains("\"in\":7"));
        assert!(json.contains("\"if\":true"));
        assert!(json.contains("\"cf\":false"));
    }
}
