//! Terminal front ends for the HADLoC emulator.
//!
//! The plain emulator shows the display and an input box and runs at once.
//! The debugger adds:
//! - The character display with its cursor
//! - Register and flag view
//! - RAM view around the H:L address
//! - Run/pause/step/breakpoint controls and an input box

mod app;
mod ui;

pub use app::{DebuggerApp, Mode, run_debugger, run_emulator};
