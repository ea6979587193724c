//! HADLoC Emulator - CLI Entry Point
//!
//! Commands:
//! - `hadloc-emu run <rom>` - Run a ROM image headless until it halts
//! - `hadloc-emu emulate <rom>` - Run on a live display with typed input
//! - `hadloc-emu debug <rom>` - Interactive debugger
//! - `hadloc-emu disasm <rom>` - Disassemble a ROM image

use clap::{Parser, Subcommand};
use hadloc::display::{DEFAULT_COLUMNS, DEFAULT_ROWS};

#[derive(Parser)]
#[command(name = "hadloc-emu")]
#[command(version = "0.1.0")]
#[command(about = "An emulator of the HADLoC 8-bit computer and its character LCD")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program until it halts
    Run {
        /// Path to the ROM image (binary, or `.txt` of 0/1 lines)
        rom: String,
        /// Maximum number of cycles to run (default: 100000)
        #[arg(short, long, default_value = "100000")]
        max_cycles: u64,
        /// Show trace output
        #[arg(short, long)]
        trace: bool,
        /// Display rows
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: usize,
        /// Display columns
        #[arg(long, default_value_t = DEFAULT_COLUMNS)]
        columns: usize,
        /// Print the final registers as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a program on a live display with typed input
    Emulate {
        /// Path to the ROM image
        rom: String,
        /// Display rows
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: usize,
        /// Display columns
        #[arg(long, default_value_t = DEFAULT_COLUMNS)]
        columns: usize,
    },
    /// Interactive debugger
    Debug {
        /// Path to the ROM image to debug
        rom: String,
        /// Display rows
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: usize,
        /// Display columns
        #[arg(long, default_value_t = DEFAULT_COLUMNS)]
        columns: usize,
    },
    /// Disassemble a ROM image to readable text
    Disasm {
        /// Path to the ROM image
        rom: String,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { rom, max_cycles, trace, rows, columns, json }) => {
            run_program(&rom, max_cycles, trace, rows, columns, json);
        }
        Some(Commands::Emulate { rom, rows, columns }) => {
            emulate_program(&rom, rows, columns);
        }
        Some(Commands::Debug { rom, rows, columns }) => {
            debug_program(&rom, rows, columns);
        }
        Some(Commands::Disasm { rom }) => {
            disassemble_file(&rom);
        }
        None => {
            println!("HADLoC Emulator v0.1.0");
            println!("An 8-bit computer with a character LCD");
            println!();
            println!("Use --help for available commands");
        }
    }
}

/// Load a ROM image or exit with a message.
fn load_or_exit(path: &str) -> Vec<u8> {
    match hadloc::load_rom(path) {
        Ok(image) if image.is_empty() => {
            eprintln!("❌ ROM image is empty");
            std::process::exit(1);
        }
        Ok(image) => image.bytes,
        Err(e) => {
            eprintln!("❌ Failed to load ROM: {}", e);
            std::process::exit(1);
        }
    }
}

fn check_display_size(rows: usize, columns: usize) {
    if rows == 0 || columns == 0 {
        eprintln!("❌ Display needs at least one row and one column");
        std::process::exit(1);
    }
}

fn run_program(path: &str, max_cycles: u64, trace: bool, rows: usize, columns: usize, json: bool) {
    use hadloc::asm::disasm::disassemble_instruction;
    use hadloc::display::{Display, LogRenderer};
    use hadloc::Machine;

    check_display_size(rows, columns);
    let rom = load_or_exit(path);

    let display = Display::new(rows, columns).with_renderer(Box::new(LogRenderer));
    let mut machine = match Machine::with_rom(&rom, display) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("❌ Failed to load program: {}", e);
            std::process::exit(1);
        }
    };

    if !json {
        println!("🔧 Running: {} ({} bytes)", path, rom.len());
        println!();
        println!("━━━ Execution ━━━");
    }

    // Run with optional trace
    let mut cycles = 0u64;
    while !machine.terminated() && cycles < max_cycles {
        let pc = machine.cpu.regs.pc.value() as usize;
        let raw = machine.cpu.rom.read(pc).as_u8();

        if machine.step().is_none() {
            break;
        }
        cycles += 1;

        if trace {
            let regs = &machine.cpu.regs;
            eprintln!(
                "{:04x}: {:<14} X={:3} Y={:3} H={:3} L={:3} CF={}",
                pc,
                disassemble_instruction(raw),
                regs.x.value(),
                regs.y.value(),
                regs.h.value(),
                regs.l.value(),
                regs.carry as u8,
            );
        }
    }

    if json {
        match serde_json::to_string_pretty(&machine.cpu.regs.snapshot()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to encode registers: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let regs = &machine.cpu.regs;
    println!();
    println!("━━━ Display ━━━");
    println!("{}", machine.display);
    println!();
    println!("━━━ Result ━━━");
    println!("Cycles: {}", cycles);
    println!("State:  {}", if machine.terminated() { "Halted" } else { "Running" });
    println!("X:  {} ({})", regs.x, regs.x.value());
    println!("Y:  {} ({})", regs.y, regs.y.value());
    println!("H:  {} ({})", regs.h, regs.h.value());
    println!("L:  {} ({})", regs.l, regs.l.value());
    println!("PC: {:04x}", regs.pc.value());
    println!("CF: {}  IF: {}", regs.carry as u8, regs.input_ready as u8);

    if cycles >= max_cycles && !machine.terminated() {
        println!();
        println!("⚠️  Reached max cycles limit ({}). Use --max-cycles to increase.", max_cycles);
    }
}

#[cfg(feature = "tui")]
fn emulate_program(path: &str, rows: usize, columns: usize) {
    use hadloc::display::Display;
    use hadloc::tui::run_emulator;

    check_display_size(rows, columns);
    let rom = load_or_exit(path);

    if let Err(e) = run_emulator(&rom, Display::new(rows, columns)) {
        eprintln!("❌ Emulator error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn emulate_program(_path: &str, _rows: usize, _columns: usize) {
    eprintln!("❌ This build has no terminal front end; rebuild with the `tui` feature");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
fn debug_program(path: &str, rows: usize, columns: usize) {
    use hadloc::display::Display;
    use hadloc::tui::run_debugger;

    check_display_size(rows, columns);
    let rom = load_or_exit(path);

    println!("🔍 Loaded {} bytes from {}", rom.len(), path);
    println!("🚀 Launching debugger...");

    if let Err(e) = run_debugger(&rom, Display::new(rows, columns)) {
        eprintln!("❌ Debugger error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn debug_program(_path: &str, _rows: usize, _columns: usize) {
    eprintln!("❌ This build has no debugger; rebuild with the `tui` feature");
    std::process::exit(1);
}

fn disassemble_file(path: &str) {
    use hadloc::disassemble;

    let rom = load_or_exit(path);

    println!("📖 Disassembling: {}", path);
    println!();
    println!("{}", disassemble(&rom));
}
