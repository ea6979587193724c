//! End-to-end programs run on a full machine.

use hadloc::display::{Display, Grid};
use hadloc::{parse_rom_text, Machine};
use std::cell::RefCell;
use std::rc::Rc;

fn machine(rom: &[u8], rows: usize, columns: usize) -> Machine {
    Machine::with_rom(rom, Display::new(rows, columns)).unwrap()
}

#[test]
fn test_hello() {
    // LDB 65 ; OUT L ; HLT
    let mut m = machine(&[0xC1, 0x09, 0x00], 1, 4);
    assert_eq!(m.run_limited(100), 2);
    assert!(m.terminated());
    assert_eq!(m.display.rows(), vec!["A   "]);
    assert_eq!(m.display.address(), 1);
}

#[test]
fn test_countdown_loop() {
    let rom = [
        0x83, // 0: LDB 3
        0x25, // 1: MOV L, X
        0xB0, // 2: LDB 48
        0x40, // 3: ADD L, L
        0x09, // 4: OUT L
        0x66, // 5: DEC X, L
        0x82, // 6: LDB 2
        0x19, // 7: JMP P
        0x00, // 8: HLT
    ];
    let mut m = machine(&rom, 1, 8);

    assert_eq!(m.run(), 20);
    assert!(m.terminated());
    assert_eq!(m.display.rows()[0], "321     ");
    assert_eq!(m.cpu.regs.x.value(), 0);
    assert_eq!(m.cpu.regs.pc.value(), 8);
}

#[test]
fn test_jump_positive_excludes_127() {
    let rom = [
        0xFF, // 0: LDB 127
        0x25, // 1: MOV L, X
        0x85, // 2: LDB 5
        0x19, // 3: JMP P
        0x00, // 4: HLT
        0x00, // 5: HLT
    ];
    let mut m = machine(&rom, 1, 4);
    m.run();
    assert_eq!(m.cpu.regs.x.value(), 127);
    assert_eq!(m.cpu.regs.pc.value(), 4);

    // Same program with 126 takes the jump.
    let mut rom = rom;
    rom[0] = 0xFE;
    let mut m = machine(&rom, 1, 4);
    m.run();
    assert_eq!(m.cpu.regs.pc.value(), 5);
}

#[test]
fn test_wait_for_input() {
    let rom = [
        0x84, // 0: LDB 4
        0x12, // 1: JMP I
        0x80, // 2: LDB 0
        0x1F, // 3: JMP PZN
        0x0A, // 4: OUT IN
        0x00, // 5: HLT
    ];
    let mut m = machine(&rom, 1, 4);

    assert_eq!(m.run_limited(100), 100);
    assert!(!m.terminated());
    assert_eq!(m.display.rows()[0], "    ");

    m.input(b'h');
    m.run_limited(100);

    assert!(m.terminated());
    assert_eq!(m.display.rows()[0], "h   ");
    assert!(!m.cpu.regs.input_ready);
}

#[test]
fn test_display_commands() {
    let rom = [
        0xC1, // LDB 65
        0x09, // OUT L
        0x81, // LDB 1
        0x0D, // OUTI L (clear)
        0x84, // LDB 4
        0x0D, // OUTI L (entry mode, backward)
        0xC2, // LDB 66
        0x09, // OUT L
        0xC3, // LDB 67
        0x09, // OUT L
        0x00, // HLT
    ];
    let mut m = machine(&rom, 1, 4);
    m.run_limited(100);

    assert_eq!(m.display.rows()[0], "B  C");
    assert_eq!(m.display.address(), 2);
}

#[test]
fn test_memory_round_trip() {
    let rom = [
        0x87, // LDB 7
        0x25, // MOV L, X
        0x24, // MOV X, M
        0x70, // ADD X, M
        0x00, // HLT
    ];
    let mut m = machine(&rom, 1, 4);
    m.run_limited(100);

    assert_eq!(m.cpu.ram.read(7).value(), 7);
    assert_eq!(m.cpu.regs.x.value(), 14);
    assert!(!m.cpu.regs.carry);
}

#[test]
fn test_reset_keeps_state() {
    let mut m = machine(&[0xC1, 0x09, 0x00], 1, 4);
    m.run_limited(100);
    m.reset();

    assert_eq!(m.cpu.regs.pc.value(), 0);
    assert_eq!(m.cpu.regs.l.value(), 65);
    assert!(!m.terminated());

    m.run_limited(100);
    assert_eq!(m.display.rows()[0], "AA  ");
}

#[test]
fn test_renderer_sees_every_change() {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);
    let display = Display::new(1, 3).with_renderer(Box::new(move |grid: &Grid| {
        sink.borrow_mut().push(grid.row_text(0));
    }));

    let mut m = Machine::with_rom(&[0xC8, 0x09, 0xC9, 0x09, 0x00], display).unwrap();
    m.run_limited(100);

    assert_eq!(*frames.borrow(), vec!["H  ".to_string(), "HI ".to_string()]);
}

#[test]
fn test_text_rom_program() {
    let source = "\
11000001  ldb 65
00001001  out L
00000000  hlt
";
    let image = parse_rom_text(source).unwrap();
    let mut m = machine(&image.bytes, 1, 2);
    m.run_limited(10);
    assert_eq!(m.display.rows()[0], "A ");
}
