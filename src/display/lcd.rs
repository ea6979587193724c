//! Character LCD peripheral.
//!
//! Models the command interpreter of an HD44780-style character display.
//! The command is chosen by the highest set bit of the instruction word:
//!
//! ```text
//! 0000_0001  Clear display       address := 0, increment := +1, blank grid
//! 0000_001x  Return home         address := 0
//! 0000_01ds  Entry mode set      d: increment +1 (else -1)
//! ```
//!
//! The datasheet gives each command an execution time (1.52 ms for return
//! home); the emulator applies commands immediately.

use std::fmt;
use crate::bits::BitWord;
use crate::cpu::OutputDevice;
use crate::display::render::{Grid, Renderer};
use log::debug;

/// Default number of rows.
pub const DEFAULT_ROWS: usize = 4;

/// Default number of columns.
pub const DEFAULT_COLUMNS: usize = 20;

/// Cursor movement applied after each character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Increment {
    Forward,
    Backward,
}

/// A display command understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCommand {
    Clear,
    ReturnHome,
    EntryModeSet { increment: Increment },
}

impl DisplayCommand {
    /// Decode an instruction word. Unsupported commands give `None`.
    pub fn decode(word: BitWord) -> Option<Self> {
        match word.msb()? {
            0 => Some(DisplayCommand::Clear),
            1 => Some(DisplayCommand::ReturnHome),
            2 => Some(DisplayCommand::EntryModeSet {
                increment: if word.is_set(1) {
                    Increment::Forward
                } else {
                    Increment::Backward
                },
            }),
            _ => None,
        }
    }
}

/// The character display.
pub struct Display {
    grid: Grid,
    address: usize,
    increment: Increment,
    renderer: Option<Box<dyn Renderer>>,
}

impl Display {
    /// Create a blank display.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            grid: Grid::new(rows, columns),
            address: 0,
            increment: Increment::Forward,
            renderer: None,
        }
    }

    /// Attach a renderer, replacing any previous one.
    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = Some(renderer);
    }

    /// Builder form of [`Display::set_renderer`].
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.set_renderer(renderer);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cursor position in the flattened grid.
    pub fn address(&self) -> usize {
        self.address
    }

    pub fn increment(&self) -> Increment {
        self.increment
    }

    /// Cursor position as (row, column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.address / self.grid.columns(), self.address % self.grid.columns())
    }

    /// Every row as a string, top to bottom.
    pub fn rows(&self) -> Vec<String> {
        self.grid.lines()
    }

    /// Write a character at the cursor and advance it.
    pub fn data(&mut self, value: BitWord) {
        let c = char::from(value.as_u8());
        self.grid.set(self.address, c);

        let len = self.grid.len();
        self.address = match self.increment {
            Increment::Forward => (self.address + 1) % len,
            Increment::Backward => (self.address + len - 1) % len,
        };

        self.render();
    }

    /// Execute a display command.
    pub fn instruction(&mut self, value: BitWord) {
        match DisplayCommand::decode(value) {
            Some(command) => {
                debug!("LCD: {:?}", command);
                self.apply(command);
            }
            None => {
                debug!("LCD: ignoring unsupported command {:#04x}", value.value());
                return;
            }
        }

        self.render();
    }

    /// Apply a decoded command.
    pub fn apply(&mut self, command: DisplayCommand) {
        match command {
            DisplayCommand::Clear => {
                self.address = 0;
                self.increment = Increment::Forward;
                self.grid.clear();
            }
            DisplayCommand::ReturnHome => {
                self.address = 0;
            }
            DisplayCommand::EntryModeSet { increment } => {
                self.increment = increment;
            }
        }
    }

    fn render(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&self.grid);
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}

impl OutputDevice for Display {
    fn data(&mut self, value: BitWord) {
        Display::data(self, value);
    }

    fn instruction(&mut self, value: BitWord) {
        Display::instruction(self, value);
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Display")
            .field("address", &self.address)
            .field("increment", &self.increment)
            .field("grid", &self.grid)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const CLEAR: u8 = 0b0000_0001;
    const HOME: u8 = 0b0000_0010;
    const ENTRY_FORWARD: u8 = 0b0000_0110;
    const ENTRY_BACKWARD: u8 = 0b0000_0100;

    fn write_str(display: &mut Display, text: &str) {
        for byte in text.bytes() {
            display.data(BitWord::from(byte));
        }
    }

    #[test]
    fn test_command_decode() {
        assert_eq!(DisplayCommand::decode(BitWord::from(CLEAR)), Some(DisplayCommand::Clear));
        assert_eq!(DisplayCommand::decode(BitWord::from(0b11)), Some(DisplayCommand::ReturnHome));
        assert_eq!(
            DisplayCommand::decode(BitWord::from(0b111)),
            Some(DisplayCommand::EntryModeSet { increment: Increment::Forward })
        );
        assert_eq!(
            DisplayCommand::decode(BitWord::from(0b101)),
            Some(DisplayCommand::EntryModeSet { increment: Increment::Backward })
        );
        assert_eq!(DisplayCommand::decode(BitWord::from(0)), None);
        assert_eq!(DisplayCommand::decode(BitWord::from(0b0000_1100)), None);
        assert_eq!(DisplayCommand::decode(BitWord::from(0x80)), None);
    }

    #[test]
    fn test_data_writes_and_advances() {
        let mut display = Display::default();
        write_str(&mut display, "Hi");

        assert_eq!(display.grid().get(0, 0), 'H');
        assert_eq!(display.grid().get(0, 1), 'i');
        assert_eq!(display.address(), 2);
        assert_eq!(display.rows()[0], format!("Hi{}", " ".repeat(18)));
    }

    #[test]
    fn test_data_wraps_rows() {
        let mut display = Display::new(2, 3);
        write_str(&mut display, "abcd");

        assert_eq!(display.rows(), vec!["abc".to_string(), "d  ".to_string()]);
        assert_eq!(display.cursor(), (1, 1));
    }

    #[test]
    fn test_data_wraps_grid() {
        let mut display = Display::new(1, 3);
        write_str(&mut display, "abcz");
        assert_eq!(display.rows()[0], "zbc");
        assert_eq!(display.address(), 1);
    }

    #[test]
    fn test_backward_entry_mode() {
        let mut display = Display::new(2, 2);
        display.instruction(BitWord::from(ENTRY_BACKWARD));
        write_str(&mut display, "ab");

        assert_eq!(display.grid().at(0), 'a');
        assert_eq!(display.grid().at(3), 'b');
        assert_eq!(display.address(), 2);
    }

    #[test]
    fn test_clear() {
        let mut display = Display::new(2, 2);
        display.instruction(BitWord::from(ENTRY_BACKWARD));
        write_str(&mut display, "xy");
        display.instruction(BitWord::from(CLEAR));

        assert_eq!(display.address(), 0);
        assert_eq!(display.increment(), Increment::Forward);
        assert!(display.rows().iter().all(|row| row == "  "));
    }

    #[test]
    fn test_return_home_keeps_contents() {
        let mut display = Display::default();
        display.instruction(BitWord::from(ENTRY_BACKWARD));
        display.instruction(BitWord::from(ENTRY_FORWARD));
        write_str(&mut display, "abc");
        display.instruction(BitWord::from(HOME));

        assert_eq!(display.address(), 0);
        assert_eq!(display.increment(), Increment::Forward);
        assert_eq!(&display.rows()[0][..3], "abc");

        write_str(&mut display, "X");
        assert_eq!(&display.rows()[0][..3], "Xbc");
    }

    #[test]
    fn test_unsupported_command_is_ignored() {
        let mut display = Display::new(1, 4);
        write_str(&mut display, "ab");
        display.instruction(BitWord::from(0b0011_1000));

        assert_eq!(display.address(), 2);
        assert_eq!(display.rows()[0], "ab  ");
    }

    #[test]
    fn test_renderer_called_after_mutations() {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        let mut display = Display::new(1, 4).with_renderer(Box::new(move |grid: &Grid| {
            sink.borrow_mut().push(grid.row_text(0));
        }));

        write_str(&mut display, "ok");
        display.instruction(BitWord::from(CLEAR));
        display.instruction(BitWord::from(0x80));

        assert_eq!(
            *frames.borrow(),
            vec!["o   ".to_string(), "ok  ".to_string(), "    ".to_string()]
        );
    }

    proptest! {
        #[test]
        fn prop_address_stays_in_bounds(
            rows in 1usize..5,
            columns in 1usize..21,
            ops in proptest::collection::vec((any::<bool>(), any::<u8>()), 0..200),
        ) {
            let mut display = Display::new(rows, columns);
            display.instruction(BitWord::from(CLEAR));
            for (is_command, value) in ops {
                if is_command {
                    display.instruction(BitWord::from(value));
                } else {
                    display.data(BitWord::from(value));
                }
                prop_assert!(display.address() < rows * columns);
            }
        }
    }
}
