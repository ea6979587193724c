//! Instruction decoder for the HADLoC.
//!
//! Instructions are 8-bit words classified by the position of their
//! highest set bit. Classes with fewer fixed bits leave more room for
//! operands:
//!
//! ```text
//! 0000_0000  HLT
//! 1vvv_vvvv  LDB   L := v
//! 01om_cccc  ALU   o: result to X (else L), m: operand from memory (else L)
//! 001n_nnnn  MOV   n = source * 5 + destination (n < 25)
//! 0001_sccc  JMP   s: register group (else flag group), c: conditions
//! 0000_1mss  OUT   ss: source, m: display instruction (else data)
//! 0000_01xx  reserved
//! 0000_001c  INH   H := H + 1 when CF == c
//! 0000_0001  NOP
//! ```
//!
//! Decoding is total: every byte maps to exactly one [`Instruction`].

use crate::bits::BitWord;
use crate::cpu::alu::AluOp;
use serde::Serialize;

/// Register or memory read by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoveSource {
    X,
    L,
    In,
    Memory,
    Y,
}

impl MoveSource {
    /// All sources in encoding order.
    pub const ALL: [MoveSource; 5] = [
        MoveSource::X,
        MoveSource::L,
        MoveSource::In,
        MoveSource::Memory,
        MoveSource::Y,
    ];

    fn index(self) -> u8 {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0) as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            MoveSource::X => "X",
            MoveSource::L => "L",
            MoveSource::In => "IN",
            MoveSource::Memory => "M",
            MoveSource::Y => "Y",
        }
    }
}

/// Register or memory written by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoveTarget {
    X,
    L,
    H,
    Y,
    Memory,
}

impl MoveTarget {
    /// All destinations in encoding order.
    pub const ALL: [MoveTarget; 5] = [
        MoveTarget::X,
        MoveTarget::L,
        MoveTarget::H,
        MoveTarget::Y,
        MoveTarget::Memory,
    ];

    fn index(self) -> u8 {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0) as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            MoveTarget::X => "X",
            MoveTarget::L => "L",
            MoveTarget::H => "H",
            MoveTarget::Y => "Y",
            MoveTarget::Memory => "M",
        }
    }
}

/// Jump condition bits.
///
/// Within a group the set bits are OR-ed, so setting all of them gives an
/// unconditional jump and setting none gives a jump that never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JumpCondition {
    /// Test the signed value of X.
    Register { positive: bool, zero: bool, negative: bool },
    /// Test the carry and input-ready flags.
    Flags { carry: bool, input: bool },
}

impl JumpCondition {
    /// Jump if X is zero, positive or negative.
    pub const ALWAYS: JumpCondition = JumpCondition::Register {
        positive: true,
        zero: true,
        negative: true,
    };
}

/// Value routed to the display by an output instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutputSource {
    X,
    L,
    In,
    Memory,
}

impl OutputSource {
    /// All sources in encoding order.
    pub const ALL: [OutputSource; 4] = [
        OutputSource::X,
        OutputSource::L,
        OutputSource::In,
        OutputSource::Memory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputSource::X => "X",
            OutputSource::L => "L",
            OutputSource::In => "IN",
            OutputSource::Memory => "M",
        }
    }
}

/// How the display should interpret an output value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutputMode {
    /// A character to write at the cursor.
    Data,
    /// A display command.
    Instruction,
}

/// Decoded HADLoC instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Instruction {
    /// Halt: the all-zero word.
    Halt,

    /// Load a 7-bit immediate into L.
    LoadImmediate { value: u8 },

    /// ALU operation. `out_x` selects X (else L) as destination; `memory`
    /// selects the second operand from memory (else L).
    Alu { op: AluOp, out_x: bool, memory: bool },

    /// Copy a value across the register/memory crossbar.
    Move { source: MoveSource, target: MoveTarget },

    /// Conditional jump to `H:L`.
    Jump { condition: JumpCondition },

    /// Forward a value to the display.
    Output { source: OutputSource, mode: OutputMode },

    /// Increment H when CF equals `when`.
    CarryAdjust { when: bool },

    /// No operation (the lone class-0 word).
    Nop,

    /// Unassigned encoding; executes as a no-op.
    Reserved { raw: u8 },
}

/// Number of defined move encodings.
const MOVE_ENCODINGS: u8 = 25;

/// Decode an 8-bit instruction word.
pub fn decode(word: BitWord) -> Instruction {
    let raw = word.as_u8();

    match word.msb() {
        None => Instruction::Halt,
        Some(7) => Instruction::LoadImmediate {
            value: word.slice(0, 7).as_u8(),
        },
        Some(6) => Instruction::Alu {
            op: AluOp::from_opcode(word.slice(0, 4).as_u8()),
            out_x: word.is_set(5),
            memory: word.is_set(4),
        },
        Some(5) => {
            let n = word.slice(0, 5).as_u8();
            if n < MOVE_ENCODINGS {
                Instruction::Move {
                    source: MoveSource::ALL[(n / 5) as usize],
                    target: MoveTarget::ALL[(n % 5) as usize],
                }
            } else {
                Instruction::Reserved { raw }
            }
        }
        Some(4) => {
            let condition = if word.is_set(3) {
                JumpCondition::Register {
                    positive: word.is_set(0),
                    zero: word.is_set(1),
                    negative: word.is_set(2),
                }
            } else {
                JumpCondition::Flags {
                    carry: word.is_set(0),
                    input: word.is_set(1),
                }
            };
            Instruction::Jump { condition }
        }
        Some(3) => Instruction::Output {
            source: OutputSource::ALL[word.slice(0, 2).value() as usize],
            mode: if word.is_set(2) {
                OutputMode::Instruction
            } else {
                OutputMode::Data
            },
        },
        Some(1) => Instruction::CarryAdjust { when: word.is_set(0) },
        Some(0) => Instruction::Nop,
        Some(_) => Instruction::Reserved { raw },
    }
}

/// Encode an instruction back to an 8-bit word.
pub fn encode(instr: &Instruction) -> u8 {
    match *instr {
        Instruction::Halt => 0,
        Instruction::LoadImmediate { value } => 0x80 | (value & 0x7F),
        Instruction::Alu { op, out_x, memory } => {
            0x40 | ((out_x as u8) << 5) | ((memory as u8) << 4) | op.opcode()
        }
        Instruction::Move { source, target } => 0x20 | (source.index() * 5 + target.index()),
        Instruction::Jump { condition } => {
            let bits = match condition {
                JumpCondition::Register { positive, zero, negative } => {
                    0x08 | (positive as u8) | ((zero as u8) << 1) | ((negative as u8) << 2)
                }
                JumpCondition::Flags { carry, input } => (carry as u8) | ((input as u8) << 1),
            };
            0x10 | bits
        }
        Instruction::Output { source, mode } => {
            let source = OutputSource::ALL.iter().position(|s| *s == source).unwrap_or(0) as u8;
            let mode = match mode {
                OutputMode::Data => 0,
                OutputMode::Instruction => 0x04,
            };
            0x08 | mode | source
        }
        Instruction::CarryAdjust { when } => 0x02 | when as u8,
        Instruction::Nop => 0x01,
        Instruction::Reserved { raw } => raw,
    }
}
