//! A complete HADLoC: one CPU wired to one display.

use crate::cpu::{Cpu, Instruction, MemoryError};
use crate::display::Display;
use log::debug;

/// The CPU together with the display its output instructions drive.
#[derive(Debug)]
pub struct Machine {
    pub cpu: Cpu,
    pub display: Display,
}

impl Machine {
    /// Create a machine with a blank ROM and the given display.
    pub fn new(display: Display) -> Self {
        Self {
            cpu: Cpu::new(),
            display,
        }
    }

    /// Create a machine and load a ROM image.
    pub fn with_rom(rom: &[u8], display: Display) -> Result<Self, MemoryError> {
        let mut machine = Self::new(display);
        machine.load_rom(rom)?;
        Ok(machine)
    }

    /// Replace the ROM image and restart from address 0.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), MemoryError> {
        debug!("Loading {} byte ROM image", rom.len());
        self.cpu.load_program(rom)
    }

    /// Check if the CPU is sitting on a halt.
    pub fn terminated(&self) -> bool {
        self.cpu.terminated()
    }

    /// Execute one instruction.
    pub fn step(&mut self) -> Option<Instruction> {
        self.cpu.execute(&mut self.display)
    }

    /// Run until halt. Never returns for a program that loops forever.
    ///
    /// Returns the number of instructions executed.
    pub fn run(&mut self) -> u64 {
        let mut executed = 0;
        while self.step().is_some() {
            executed += 1;
        }
        executed
    }

    /// Run until halt or until `max_cycles` instructions have executed.
    ///
    /// Returns the number of instructions executed.
    pub fn run_limited(&mut self, max_cycles: u64) -> u64 {
        let mut executed = 0;
        while executed < max_cycles && self.step().is_some() {
            executed += 1;
        }
        executed
    }

    /// Latch an input value.
    pub fn input(&mut self, value: u8) {
        self.cpu.input(value);
    }

    /// Press the reset button (PC only).
    pub fn reset(&mut self) {
        self.cpu.reset();
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(Display::default())
    }
}
