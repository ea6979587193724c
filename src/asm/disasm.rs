//! Disassembler for HADLoC programs.
//!
//! Converts ROM bytes back to readable assembly.

use crate::bits::BitWord;
use crate::cpu::decode::{decode, Instruction, JumpCondition, OutputMode};

/// Disassemble a single instruction byte to text.
pub fn disassemble_instruction(byte: u8) -> String {
    format_instruction(&decode(BitWord::from(byte)))
}

/// Disassemble a slice of instruction bytes.
pub fn disassemble(bytes: &[u8]) -> String {
    let mut output = String::new();
    output.push_str("; HADLoC Disassembly\n");
    output.push_str("; ------------------\n\n");

    for (addr, byte) in bytes.iter().enumerate() {
        let line = disassemble_instruction(*byte);
        output.push_str(&format!("{:04x}: {:<14} ; {:08b}\n", addr, line, byte));
    }

    output
}

/// Format a decoded instruction as assembly text.
pub fn format_instruction(instr: &Instruction) -> String {
    match instr {
        Instruction::Halt => "HLT".to_string(),
        Instruction::LoadImmediate { value } => format!("LDB {}", value),
        Instruction::Alu { op, out_x, memory } => format!(
            "{} {}, {}",
            op.mnemonic(),
            if *out_x { "X" } else { "L" },
            if *memory { "M" } else { "L" },
        ),
        Instruction::Move { source, target } => format!("MOV {}, {}", source.name(), target.name()),
        Instruction::Jump { condition } => format!("JMP {}", format_condition(condition)),
        Instruction::Output { source, mode } => match mode {
            OutputMode::Data => format!("OUT {}", source.name()),
            OutputMode::Instruction => format!("OUTI {}", source.name()),
        },
        Instruction::CarryAdjust { when } => format!("INH {}", *when as u8),
        Instruction::Nop => "NOP".to_string(),
        Instruction::Reserved { raw } => format!("RSV {:#04x}", raw),
    }
}

/// Format jump conditions as a list of flag letters.
fn format_condition(condition: &JumpCondition) -> String {
    let letters: Vec<&str> = match *condition {
        JumpCondition::Register { positive, zero, negative } => [
            (positive, "P"),
            (zero, "Z"),
            (negative, "N"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect(),
        JumpCondition::Flags { carry, input } => [(carry, "C"), (input, "I")]
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| *name)
            .collect(),
    };

    if letters.is_empty() {
        "-".to_string()
    } else {
        letters.join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::decode::encode;
    use crate::cpu::{AluOp, MoveSource, MoveTarget, OutputSource};

    #[test]
    fn test_disassemble_hlt() {
        assert_eq!(disassemble_instruction(0), "HLT");
    }

    #[test]
    fn test_disassemble_classes() {
        assert_eq!(disassemble_instruction(0x80 | 65), "LDB 65");
        assert_eq!(
            disassemble_instruction(encode(&Instruction::Alu { op: AluOp::Sub, out_x: true, memory: true })),
            "SUB X, M"
        );
        assert_eq!(
            disassemble_instruction(encode(&Instruction::Move { source: MoveSource::In, target: MoveTarget::H })),
            "MOV IN, H"
        );
        assert_eq!(
            disassemble_instruction(encode(&Instruction::Output {
                source: OutputSource::X,
                mode: OutputMode::Instruction
            })),
            "OUTI X"
        );
        assert_eq!(disassemble_instruction(0b0000_0011), "INH 1");
        assert_eq!(disassemble_instruction(0b0000_0001), "NOP");
        assert_eq!(disassemble_instruction(0b0000_0110), "RSV 0x06");
    }

    #[test]
    fn test_disassemble_jumps() {
        assert_eq!(disassemble_instruction(0b0001_1111), "JMP PZN");
        assert_eq!(disassemble_instruction(0b0001_1010), "JMP Z");
        assert_eq!(disassemble_instruction(0b0001_0011), "JMP CI");
        assert_eq!(disassemble_instruction(0b0001_0000), "JMP -");
    }

    #[test]
    fn test_disassemble_listing() {
        let listing = disassemble(&[0xC1, 0x09, 0x00]);
        assert!(listing.contains("0000: LDB 65"));
        assert!(listing.contains("0001: OUT L"));
        assert!(listing.contains("0002: HLT"));
        assert!(listing.contains("; 11000001"));
    }
}
