//! Table-driven arithmetic/logic unit.
//!
//! A 4-bit user opcode is remapped through [`OPCODE_MAPPING`] into a 6-bit
//! control word. The control word alone decides how the two operands are
//! conditioned, combined and post-processed:
//!
//! ```text
//! bit 5  zero_x         x := 0
//! bit 4  invert_x       x := !x
//! bit 3  zero_b         b := 0
//! bit 2  invert_b       b := !b
//! bit 1  use_add        out := x + b   (else x & b)
//! bit 0  invert_result  out := !out
//! ```

use crate::bits::{self, BitWord};
use serde::Serialize;

/// Control words indexed by user opcode.
///
/// Existing HADLoC binaries depend on this exact table.
pub const OPCODE_MAPPING: [u8; 16] = [
    0b000010, // 0  ADD   x + b
    0b010011, // 1  SUB   x - b
    0b000111, // 2  RSB   b - x
    0b000000, // 3  AND   x & b
    0b010101, // 4  OR    x | b
    0b011111, // 5  INC   x + 1
    0b001110, // 6  DEC   x - 1
    0b110111, // 7  INCB  b + 1
    0b110010, // 8  DECB  b - 1
    0b001111, // 9  NEG   -x
    0b110011, // 10 NEGB  -b
    0b001101, // 11 NOT   !x
    0b110001, // 12 NOTB  !b
    0b101010, // 13 ZERO  0
    0b111111, // 14 ONE   1
    0b111010, // 15 MONE  -1
];

/// User-visible ALU operation, named by what its table entry computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum AluOp {
    Add = 0,
    Sub = 1,
    Rsb = 2,
    And = 3,
    Or = 4,
    Inc = 5,
    Dec = 6,
    IncB = 7,
    DecB = 8,
    Neg = 9,
    NegB = 10,
    Not = 11,
    NotB = 12,
    Zero = 13,
    One = 14,
    MinusOne = 15,
}

impl AluOp {
    /// All operations in opcode order.
    pub const ALL: [AluOp; 16] = [
        AluOp::Add, AluOp::Sub, AluOp::Rsb, AluOp::And,
        AluOp::Or, AluOp::Inc, AluOp::Dec, AluOp::IncB,
        AluOp::DecB, AluOp::Neg, AluOp::NegB, AluOp::Not,
        AluOp::NotB, AluOp::Zero, AluOp::One, AluOp::MinusOne,
    ];

    /// Look up the operation for a 4-bit opcode. Upper bits are ignored.
    #[inline]
    pub fn from_opcode(opcode: u8) -> Self {
        Self::ALL[(opcode & 0x0F) as usize]
    }

    /// The 4-bit user opcode.
    #[inline]
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    /// The control word this operation maps to.
    #[inline]
    pub fn control(self) -> ControlWord {
        ControlWord::from_opcode(self.opcode())
    }

    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::Rsb => "RSB",
            AluOp::And => "AND",
            AluOp::Or => "OR",
            AluOp::Inc => "INC",
            AluOp::Dec => "DEC",
            AluOp::IncB => "INCB",
            AluOp::DecB => "DECB",
            AluOp::Neg => "NEG",
            AluOp::NegB => "NEGB",
            AluOp::Not => "NOT",
            AluOp::NotB => "NOTB",
            AluOp::Zero => "ZERO",
            AluOp::One => "ONE",
            AluOp::MinusOne => "MONE",
        }
    }
}

/// The six ALU control signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlWord(u8);

impl ControlWord {
    const ZERO_X: u8 = 1 << 5;
    const INVERT_X: u8 = 1 << 4;
    const ZERO_B: u8 = 1 << 3;
    const INVERT_B: u8 = 1 << 2;
    const USE_ADD: u8 = 1 << 1;
    const INVERT_RESULT: u8 = 1 << 0;

    /// Translate a 4-bit user opcode through the mapping table.
    #[inline]
    pub fn from_opcode(opcode: u8) -> Self {
        Self(OPCODE_MAPPING[(opcode & 0x0F) as usize])
    }

    /// Raw 6-bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn zero_x(self) -> bool {
        self.0 & Self::ZERO_X != 0
    }

    pub const fn invert_x(self) -> bool {
        self.0 & Self::INVERT_X != 0
    }

    pub const fn zero_b(self) -> bool {
        self.0 & Self::ZERO_B != 0
    }

    pub const fn invert_b(self) -> bool {
        self.0 & Self::INVERT_B != 0
    }

    pub const fn use_add(self) -> bool {
        self.0 & Self::USE_ADD != 0
    }

    pub const fn invert_result(self) -> bool {
        self.0 & Self::INVERT_RESULT != 0
    }
}

/// Result of one ALU evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluOutput {
    /// Value for the destination register.
    pub value: BitWord,
    /// New carry flag, or `None` when the AND path leaves CF alone.
    pub carry: Option<bool>,
}

/// Run the ALU on operands `x` and `b` under a control word.
pub fn evaluate(control: ControlWord, x: BitWord, b: BitWord) -> AluOutput {
    let mut x = x;
    let mut b = b;

    if control.zero_x() {
        x = BitWord::zero(x.width());
    }
    if control.invert_x() {
        x = !x;
    }
    if control.zero_b() {
        b = BitWord::zero(b.width());
    }
    if control.invert_b() {
        b = !b;
    }

    let (mut value, carry) = if control.use_add() {
        let (sum, carry) = bits::add(x, b);
        (sum, Some(carry))
    } else {
        (bits::and(x, b), None)
    };

    if control.invert_result() {
        value = !value;
    }

    AluOutput { value, carry }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(op: AluOp, x: u8, b: u8) -> AluOutput {
        evaluate(op.control(), BitWord::from(x), BitWord::from(b))
    }

    #[test]
    fn test_every_opcode_is_mapped() {
        for (opcode, op) in AluOp::ALL.iter().enumerate() {
            assert_eq!(op.opcode() as usize, opcode);
            assert_eq!(AluOp::from_opcode(opcode as u8), *op);
            assert!(op.control().bits() < 64);
        }
    }

    #[test]
    fn test_control_word_fields() {
        let sub = ControlWord::from_opcode(1);
        assert!(!sub.zero_x());
        assert!(sub.invert_x());
        assert!(!sub.zero_b());
        assert!(!sub.invert_b());
        assert!(sub.use_add());
        assert!(sub.invert_result());
    }

    #[test]
    fn test_add() {
        let out = run(AluOp::Add, 3, 5);
        assert_eq!(out.value.value(), 8);
        assert_eq!(out.carry, Some(false));

        let out = run(AluOp::Add, 200, 100);
        assert_eq!(out.value.value(), 44);
        assert_eq!(out.carry, Some(true));
    }

    #[test]
    fn test_and_leaves_carry() {
        let out = run(AluOp::And, 0b1100, 0b1010);
        assert_eq!(out.value.value(), 0b1000);
        assert_eq!(out.carry, None);
    }

    #[test]
    fn test_constants() {
        assert_eq!(run(AluOp::Zero, 17, 99).value.value(), 0);
        assert_eq!(run(AluOp::One, 17, 99).value.value(), 1);
        assert_eq!(run(AluOp::MinusOne, 17, 99).value.value(), 0xFF);
    }

    #[test]
    fn test_unary() {
        assert_eq!(run(AluOp::Inc, 41, 0).value.value(), 42);
        assert_eq!(run(AluOp::Dec, 0, 0).value.value(), 0xFF);
        assert_eq!(run(AluOp::IncB, 0, 9).value.value(), 10);
        assert_eq!(run(AluOp::DecB, 0, 9).value.value(), 8);
        assert_eq!(run(AluOp::Neg, 1, 0).value.value(), 0xFF);
        assert_eq!(run(AluOp::NegB, 0, 2).value.value(), 0xFE);
        assert_eq!(run(AluOp::Not, 0x0F, 0).value.value(), 0xF0);
        assert_eq!(run(AluOp::NotB, 0, 0xF0).value.value(), 0x0F);
    }

    proptest! {
        #[test]
        fn prop_binary_ops(x in any::<u8>(), b in any::<u8>()) {
            prop_assert_eq!(run(AluOp::Add, x, b).value.value(), x.wrapping_add(b) as u32);
            prop_assert_eq!(run(AluOp::Sub, x, b).value.value(), x.wrapping_sub(b) as u32);
            prop_assert_eq!(run(AluOp::Rsb, x, b).value.value(), b.wrapping_sub(x) as u32);
            prop_assert_eq!(run(AluOp::And, x, b).value.value(), (x & b) as u32);
            prop_assert_eq!(run(AluOp::Or, x, b).value.value(), (x | b) as u32);
        }

        #[test]
        fn prop_add_carry(x in any::<u8>(), b in any::<u8>()) {
            let out = run(AluOp::Add, x, b);
            prop_assert_eq!(out.carry, Some(x.checked_add(b).is_none()));
        }
    }
}
