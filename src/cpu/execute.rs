//! CPU execution engine for the HADLoC.
//!
//! Implements the fetch-decode-execute cycle and all instruction behaviors.

use crate::bits::{self, BitWord};
use crate::cpu::alu;
use crate::cpu::decode::{
    self, Instruction, JumpCondition, MoveSource, MoveTarget, OutputMode, OutputSource,
};
use crate::cpu::memory::{Memory, MemoryError};
use crate::cpu::registers::{Registers, ADDRESS_WIDTH};
use log::{debug, trace};

/// A peripheral that receives values from output instructions.
pub trait OutputDevice {
    /// Accept a data value (a character for the display).
    fn data(&mut self, value: BitWord);

    /// Accept a device command.
    fn instruction(&mut self, value: BitWord);
}

/// The HADLoC CPU.
#[derive(Clone)]
pub struct Cpu {
    /// CPU registers.
    pub regs: Registers,
    /// Program memory.
    pub rom: Memory,
    /// Data memory, addressed by `H:L`.
    pub ram: Memory,
    /// Instruction count (for profiling).
    pub cycles: u64,
}

impl Cpu {
    /// Create a new CPU with zeroed state.
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            rom: Memory::new(),
            ram: Memory::new(),
            cycles: 0,
        }
    }

    /// Reset the program counter.
    ///
    /// Like the reset button on the real machine this only touches PC;
    /// registers and RAM keep whatever they held.
    pub fn reset(&mut self) {
        debug!("Reset at PC {:#06x}", self.regs.pc.value());
        self.regs.pc = BitWord::zero(ADDRESS_WIDTH);
    }

    /// Replace ROM with a new image starting at address 0 and reset PC.
    ///
    /// On error the previous image stays loaded.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), MemoryError> {
        let mut rom = Memory::new();
        rom.load_program(0, program)?;
        self.rom = rom;
        self.reset();
        Ok(())
    }

    /// Check whether the word at PC is the halt encoding.
    pub fn terminated(&self) -> bool {
        self.rom.read_at(self.regs.pc).is_zero()
    }

    /// Latch a value into IN and raise IF.
    pub fn input(&mut self, value: u8) {
        trace!("Input: {:#04x}", value);
        self.regs.latch_input(value);
    }

    /// Execute a single instruction.
    ///
    /// Returns the instruction that was executed, or `None` if the word at
    /// PC is a halt, in which case nothing changes.
    pub fn execute(&mut self, device: &mut dyn OutputDevice) -> Option<Instruction> {
        // Fetch
        let raw = self.rom.read_at(self.regs.pc);
        if raw.is_zero() {
            return None;
        }

        // Advance PC before executing (jumps override it)
        let pc = self.regs.advance_pc();

        // Decode
        let instr = decode::decode(raw);
        trace!("PC: {:#06x}: {:?}", pc.value(), instr);

        // Execute
        self.apply(instr, device);

        self.cycles += 1;

        Some(instr)
    }

    /// Apply a decoded instruction.
    fn apply(&mut self, instr: Instruction, device: &mut dyn OutputDevice) {
        match instr {
            Instruction::Halt => {}

            Instruction::LoadImmediate { value } => {
                self.regs.set_l(BitWord::from(value));
            }

            Instruction::Alu { op, out_x, memory } => {
                let b = if memory { self.read_mem() } else { self.regs.l };
                let out = alu::evaluate(op.control(), self.regs.x, b);
                if let Some(carry) = out.carry {
                    self.regs.carry = carry;
                }
                if out_x {
                    self.regs.set_x(out.value);
                } else {
                    self.regs.set_l(out.value);
                }
            }

            Instruction::Move { source, target } => {
                let value = self.read_source(source);
                self.write_target(target, value);
            }

            Instruction::Jump { condition } => {
                if self.condition_holds(condition) {
                    let target = self.regs.address();
                    self.regs.jump(target);
                }
            }

            Instruction::Output { source, mode } => {
                let value = match source {
                    OutputSource::X => self.regs.x,
                    OutputSource::L => self.regs.l,
                    OutputSource::In => self.regs.take_input(),
                    OutputSource::Memory => self.read_mem(),
                };
                match mode {
                    OutputMode::Data => device.data(value),
                    OutputMode::Instruction => device.instruction(value),
                }
            }

            Instruction::CarryAdjust { when } => {
                if self.regs.carry == when {
                    let (h, _) = bits::increment(self.regs.h);
                    self.regs.set_h(h);
                }
            }

            Instruction::Nop | Instruction::Reserved { .. } => {
                // Do nothing
            }
        }
    }

    /// Read RAM at `H:L`.
    pub fn read_mem(&self) -> BitWord {
        self.ram.read_at(self.regs.address())
    }

    /// Write RAM at `H:L`.
    pub fn write_mem(&mut self, value: BitWord) {
        let addr = self.regs.address();
        self.ram.write_at(addr, value);
    }

    fn read_source(&mut self, source: MoveSource) -> BitWord {
        match source {
            MoveSource::X => self.regs.x,
            MoveSource::L => self.regs.l,
            MoveSource::In => self.regs.take_input(),
            MoveSource::Memory => self.read_mem(),
            MoveSource::Y => self.regs.y,
        }
    }

    fn write_target(&mut self, target: MoveTarget, value: BitWord) {
        match target {
            MoveTarget::X => self.regs.set_x(value),
            MoveTarget::L => self.regs.set_l(value),
            MoveTarget::H => self.regs.set_h(value),
            MoveTarget::Y => self.regs.set_y(value),
            MoveTarget::Memory => self.write_mem(value),
        }
    }

    fn condition_holds(&self, condition: JumpCondition) -> bool {
        match condition {
            JumpCondition::Register { positive, zero, negative } => {
                // 127 is neither positive nor negative to the jump unit
                let x = self.regs.x;
                (positive && x.value() > 0 && x.value() < 127)
                    || (zero && x.is_zero())
                    || (negative && x.is_negative())
            }
            JumpCondition::Flags { carry, input } => {
                (carry && self.regs.carry) || (input && self.regs.input_ready)
            }
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("cycles", &self.cycles)
            .field("regs", &self.regs)
            .finish()
    }
}
