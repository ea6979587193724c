//! Debugger application state and logic.

use crate::asm::disasm::disassemble_instruction;
use crate::display::Display;
use crate::input::parse_input;
use crate::machine::Machine;
use crossterm::event::KeyCode;
use std::collections::HashSet;

/// Instructions executed per frame while running.
const STEPS_PER_TICK: usize = 500;

/// Which front end the app is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Paused at start, with step/run/breakpoint controls and state panels.
    Debug,
    /// Runs straight away and shows only the display and input box.
    Emulate,
}

/// Debugger application state.
pub struct DebuggerApp {
    /// The machine being debugged.
    pub machine: Machine,
    /// Breakpoints (by ROM address).
    pub breakpoints: HashSet<u16>,
    /// Is the debugger running continuously?
    pub running: bool,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
    /// Text typed into the input box.
    pub input: String,
    /// Debugger or plain emulator.
    pub mode: Mode,
}

impl DebuggerApp {
    /// Create a new debugger with a loaded program.
    pub fn new(program: &[u8], display: Display) -> Self {
        let mut machine = Machine::new(display);
        let status = match machine.load_rom(program) {
            Ok(()) => "Paused. F6 to step, F5 to run, Esc to quit.".to_string(),
            Err(e) => format!("Error: {}", e),
        };

        Self {
            machine,
            breakpoints: HashSet::new(),
            running: false,
            should_quit: false,
            status,
            input: String::new(),
            mode: Mode::Debug,
        }
    }

    /// Create an app that starts running with the debug controls disabled.
    pub fn emulator(program: &[u8], display: Display) -> Self {
        let mut app = Self::new(program, display);
        app.mode = Mode::Emulate;
        app.running = true;
        if !app.status.starts_with("Error") {
            app.status = "Running. F12 to reset, Esc to quit.".into();
        }
        app
    }

    fn pc(&self) -> u16 {
        self.machine.cpu.regs.pc.value() as u16
    }

    /// Step one instruction.
    pub fn step(&mut self) {
        if self.machine.terminated() {
            self.status = format!("Halted at PC={:04x}", self.pc());
            self.running = false;
            return;
        }

        let pc = self.pc();
        let raw = self.machine.cpu.rom.read(pc as usize).as_u8();
        self.machine.step();
        self.status = format!("PC={:04x}: {}", pc, disassemble_instruction(raw));
    }

    /// Toggle continuous execution.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        self.status = if self.running { "Running...".into() } else { "Paused.".into() };
    }

    /// Run one batch of continuous execution.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        for _ in 0..STEPS_PER_TICK {
            if self.machine.terminated() {
                self.running = false;
                self.status = format!("Halted after {} instructions", self.machine.cpu.cycles);
                return;
            }

            self.machine.step();

            let pc = self.pc();
            if self.breakpoints.contains(&pc) {
                self.running = false;
                self.status = format!("Breakpoint at PC={:04x}", pc);
                return;
            }
        }
    }

    /// Toggle breakpoint at the current PC.
    pub fn toggle_breakpoint(&mut self) {
        let pc = self.pc();
        if self.breakpoints.remove(&pc) {
            self.status = format!("Removed breakpoint at PC={:04x}", pc);
        } else {
            self.breakpoints.insert(pc);
            self.status = format!("Set breakpoint at PC={:04x}", pc);
        }
    }

    /// Press the reset button. Only PC is cleared.
    ///
    /// In emulator mode the machine starts running again.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.status = "Reset. PC=0000".into();
        if self.mode == Mode::Emulate {
            self.running = true;
        }
    }

    /// React to a key press.
    pub fn handle_key(&mut self, code: KeyCode) {
        match (code, self.mode) {
            (KeyCode::Esc, _) => self.should_quit = true,
            (KeyCode::F(12), _) => self.reset(),
            (KeyCode::F(5), Mode::Debug) => self.toggle_running(),
            (KeyCode::F(6), Mode::Debug) => {
                if !self.running {
                    self.step();
                }
            }
            (KeyCode::F(9), Mode::Debug) => self.toggle_breakpoint(),
            (KeyCode::Enter, _) => self.submit_input(),
            (KeyCode::Backspace, _) => {
                self.input.pop();
            }
            (KeyCode::Char(c), _) => self.input.push(c),
            _ => {}
        }
    }

    /// Describe what the input box currently holds.
    pub fn input_preview(&self) -> String {
        if self.input.is_empty() {
            return String::new();
        }
        match parse_input(&self.input) {
            Ok(value) => format!("= {:#04x}", value),
            Err(e) => format!("! {}", e),
        }
    }

    /// Latch the input box into IN if it parses.
    pub fn submit_input(&mut self) {
        match parse_input(&self.input) {
            Ok(value) => {
                self.machine.input(value);
                self.status = format!("IN <- {:#04x}", value);
                self.input.clear();
            }
            Err(e) => {
                self.status = format!("Invalid input: {}", e);
            }
        }
    }

    /// Get disassembly around current PC.
    pub fn get_disassembly(&self, lines: usize) -> Vec<(u16, String, bool)> {
        let pc = self.pc() as usize;
        let start = pc.saturating_sub(lines / 2);

        self.machine
            .cpu
            .rom
            .dump(start, lines)
            .into_iter()
            .map(|(addr, word)| (addr as u16, disassemble_instruction(word.as_u8()), addr == pc))
            .collect()
    }
}

/// Run the debugger with a program.
pub fn run_debugger(program: &[u8], display: Display) -> std::io::Result<()> {
    run_app(DebuggerApp::new(program, display))
}

/// Run a program on the live display, without the debug panels.
pub fn run_emulator(program: &[u8], display: Display) -> std::io::Result<()> {
    run_app(DebuggerApp::emulator(program, display))
}

fn run_app(mut app: DebuggerApp) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Main loop
    loop {
        // Draw
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        // Handle input
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        // Tick for continuous running
        app.tick();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
