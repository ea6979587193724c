//! HADLoC memory subsystem.
//!
//! ROM and RAM are separate banks of 32768 eight-bit cells, each addressed
//! by a 15-bit word.

use crate::bits::BitWord;
use crate::cpu::registers::{ADDRESS_WIDTH, WORD_WIDTH};
use log::trace;
use thiserror::Error;

/// The number of cells in each memory bank.
pub const MEMORY_SIZE: usize = 1 << ADDRESS_WIDTH;

/// A bank of 8-bit cells.
#[derive(Clone)]
pub struct Memory {
    cells: Vec<BitWord>,
}

impl Memory {
    /// Create a new memory with all cells zeroed.
    pub fn new() -> Self {
        Self {
            cells: vec![BitWord::zero(WORD_WIDTH); MEMORY_SIZE],
        }
    }

    /// Read a cell by index.
    ///
    /// # Panics
    /// Panics if index is out of range.
    #[inline]
    pub fn read(&self, index: usize) -> BitWord {
        assert!(index < MEMORY_SIZE, "Memory address {} out of range (0-{})", index, MEMORY_SIZE - 1);
        self.cells[index]
    }

    /// Write a cell by index.
    ///
    /// # Panics
    /// Panics if index is out of range.
    #[inline]
    pub fn write(&mut self, index: usize, value: BitWord) {
        assert!(index < MEMORY_SIZE, "Memory address {} out of range (0-{})", index, MEMORY_SIZE - 1);
        self.cells[index] = value.resize(WORD_WIDTH);
    }

    /// Read using a 15-bit address word.
    #[inline]
    pub fn read_at(&self, addr: BitWord) -> BitWord {
        self.read(addr.value() as usize)
    }

    /// Write using a 15-bit address word.
    pub fn write_at(&mut self, addr: BitWord, value: BitWord) {
        trace!("Mem: writing {:#04x} to {:#06x}", value.value(), addr.value());
        self.write(addr.value() as usize, value);
    }

    /// Copy a program image into memory starting at the given index.
    pub fn load_program(&mut self, start: usize, program: &[u8]) -> Result<(), MemoryError> {
        let available = MEMORY_SIZE.saturating_sub(start);
        if program.len() > available {
            return Err(MemoryError::ProgramTooLarge {
                size: program.len(),
                available,
            });
        }

        for (i, &byte) in program.iter().enumerate() {
            self.cells[start + i] = BitWord::from(byte);
        }

        Ok(())
    }

    /// Dump memory contents (for debugging).
    pub fn dump(&self, start: usize, count: usize) -> Vec<(usize, BitWord)> {
        let end = (start + count).min(MEMORY_SIZE);
        (start.min(end)..end)
            .map(|i| (i, self.cells[i]))
            .collect()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only count non-zero cells
        let non_zero = self.cells.iter().filter(|cell| !cell.is_zero()).count();

        f.debug_struct("Memory")
            .field("non_zero_cells", &non_zero)
            .field("total_cells", &MEMORY_SIZE)
            .finish()
    }
}

/// Errors that can occur during memory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("program size {size} exceeds available space {available}")]
    ProgramTooLarge { size: usize, available: usize },
}
