//! Character grid storage and the rendering hook.

use std::fmt;
use log::{debug, log_enabled, Level};

/// Blank cell contents.
pub const BLANK: char = ' ';

/// A fixed `rows × columns` grid of characters.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Create a blank grid.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, columns: usize) -> Self {
        assert!(rows > 0 && columns > 0, "display must have at least one cell ({}x{})", rows, columns);
        Self {
            rows,
            columns,
            cells: vec![BLANK; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Character at a row and column.
    pub fn get(&self, row: usize, column: usize) -> char {
        self.cells[row * self.columns + column]
    }

    /// Character at a flattened cell index.
    pub fn at(&self, index: usize) -> char {
        self.cells[index]
    }

    pub(crate) fn set(&mut self, index: usize, c: char) {
        self.cells[index] = c;
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// One row as a string.
    pub fn row_text(&self, row: usize) -> String {
        let start = row * self.columns;
        self.cells[start..start + self.columns].iter().collect()
    }

    /// Every row as a string, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        (0..self.rows).map(|row| self.row_text(row)).collect()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("lines", &self.lines())
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border: String = "-".repeat(self.columns);
        writeln!(f, "+{}+", border)?;
        for line in self.lines() {
            writeln!(f, "|{}|", line)?;
        }
        write!(f, "+{}+", border)
    }
}

/// Receives the grid after every change the display makes.
pub trait Renderer {
    fn render(&mut self, grid: &Grid);
}

impl<F: FnMut(&Grid)> Renderer for F {
    fn render(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// Writes each redraw to the log at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, grid: &Grid) {
        if log_enabled!(Level::Debug) {
            for (row, line) in grid.lines().iter().enumerate() {
                debug!("LCD[{}]: |{}|", row, line);
            }
        }
    }
}
