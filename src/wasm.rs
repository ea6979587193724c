//! WebAssembly bindings for the HADLoC emulator.
//!
//! This module provides JavaScript-friendly wrappers around the machine.

use wasm_bindgen::prelude::*;
use crate::asm::disasm::disassemble_instruction;
use crate::display::{Display, DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::input::parse_input;
use crate::machine::Machine;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly machine wrapper.
#[wasm_bindgen]
pub struct WasmMachine {
    machine: Machine,
}

#[wasm_bindgen]
impl WasmMachine {
    /// Create a machine with a display of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: Option<usize>, columns: Option<usize>) -> Result<WasmMachine, JsError> {
        let rows = rows.unwrap_or(DEFAULT_ROWS);
        let columns = columns.unwrap_or(DEFAULT_COLUMNS);
        check_display_size(rows, columns).map_err(|e| JsError::new(&e))?;

        Ok(Self {
            machine: Machine::new(Display::new(rows, columns)),
        })
    }

    /// Load a ROM image. Returns the number of bytes loaded.
    #[wasm_bindgen]
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<usize, JsError> {
        self.machine
            .load_rom(bytes)
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        Ok(bytes.len())
    }

    /// Step one instruction. Returns the disassembled instruction, or
    /// nothing if the machine is halted.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Option<String> {
        if self.machine.terminated() {
            return None;
        }
        let pc = self.machine.cpu.regs.pc.value() as usize;
        let raw = self.machine.cpu.rom.read(pc).as_u8();
        self.machine.step()?;
        Some(disassemble_instruction(raw))
    }

    /// Run until halt or max cycles.
    #[wasm_bindgen]
    pub fn run(&mut self, max_cycles: u32) -> u64 {
        self.machine.run_limited(max_cycles as u64);
        self.machine.cpu.cycles
    }

    /// Press the reset button (PC only).
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.machine.reset();
    }

    /// Parse typed text and latch it into IN.
    #[wasm_bindgen]
    pub fn input(&mut self, text: &str) -> Result<u8, JsError> {
        let value = parse_input(text).map_err(|e| JsError::new(&format!("{}", e)))?;
        self.machine.input(value);
        Ok(value)
    }

    /// Check if the machine is sitting on a halt.
    #[wasm_bindgen]
    pub fn is_terminated(&self) -> bool {
        self.machine.terminated()
    }

    /// Get cycle count.
    #[wasm_bindgen]
    pub fn cycles(&self) -> u64 {
        self.machine.cpu.cycles
    }

    /// Get program counter.
    #[wasm_bindgen]
    pub fn pc(&self) -> u32 {
        self.machine.cpu.regs.pc.value()
    }

    /// Get display contents, one string per row.
    #[wasm_bindgen]
    pub fn display_rows(&self) -> js_sys::Array {
        self.machine
            .display
            .rows()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    /// Get registers as JSON string.
    #[wasm_bindgen]
    pub fn registers_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.machine.cpu.regs.snapshot())
            .map_err(|e| JsError::new(&format!("{}", e)))
    }
}

impl Default for WasmMachine {
    fn default() -> Self {
        Self {
            machine: Machine::default(),
        }
    }
}

/// Reject display sizes the grid cannot hold.
fn check_display_size(rows: usize, columns: usize) -> Result<(), String> {
    if rows == 0 || columns == 0 {
        return Err(format!("display must have at least one cell ({}x{})", rows, columns));
    }
    Ok(())
}

/// Disassemble a single instruction byte.
#[wasm_bindgen]
pub fn wasm_disassemble(value: u8) -> String {
    disassemble_instruction(value)
}
