//! Fixed 256-entry dispatch table indexed by opcode byte.
//! Every entry pairs an addressing mode with an operation and its base cycle count.
//! Page-crossing and taken-branch penalties are not modelled.

use crate::cpu::addressing_mode::AddressingMode;
use crate::Byte;
use once_cell::sync::Lazy;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Any byte outside the documented instruction set; runs as a 2-cycle no-op
    Undefined,
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => f.write_str("*NOP"),
            documented => f.write_str(&format!("{documented:?}").to_uppercase()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub code: Byte,
    pub mnemonic: Mnemonic,
    pub cycles: u8,
    pub mode: AddressingMode,
}

impl Opcode {
    pub const fn new(code: Byte, mnemonic: Mnemonic, cycles: u8, mode: AddressingMode) -> Self {
        Self {
            code,
            mnemonic,
            cycles,
            mode,
        }
    }

    pub const fn undefined(code: Byte) -> Self {
        Self::new(code, Mnemonic::Undefined, 2, AddressingMode::Implied)
    }

    /// Total instruction length in bytes, opcode included
    pub const fn length(&self) -> u16 {
        1 + self.mode.operand_len()
    }
}

use AddressingMode::{
    Absolute, AbsoluteX, AbsoluteY, Accumulator, Immediate, Implied, Indirect, IndirectX,
    IndirectY, Relative, ZeroPage, ZeroPageX, ZeroPageY,
};
use Mnemonic::{
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc, Cld, Cli, Clv, Cmp, Cpx,
    Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla,
    Plp, Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
};

const OPCODES: &[Opcode] = &[
    Opcode::new(0x00, Brk, 7, Implied),
    Opcode::new(0xea, Nop, 2, Implied),
    // -- arithmetic --
    Opcode::new(0x69, Adc, 2, Immediate),
    Opcode::new(0x65, Adc, 3, ZeroPage),
    Opcode::new(0x75, Adc, 4, ZeroPageX),
    Opcode::new(0x6d, Adc, 4, Absolute),
    Opcode::new(0x7d, Adc, 4, AbsoluteX),
    Opcode::new(0x79, Adc, 4, AbsoluteY),
    Opcode::new(0x61, Adc, 6, IndirectX),
    Opcode::new(0x71, Adc, 5, IndirectY),
    Opcode::new(0xe9, Sbc, 2, Immediate),
    Opcode::new(0xe5, Sbc, 3, ZeroPage),
    Opcode::new(0xf5, Sbc, 4, ZeroPageX),
    Opcode::new(0xed, Sbc, 4, Absolute),
    Opcode::new(0xfd, Sbc, 4, AbsoluteX),
    Opcode::new(0xf9, Sbc, 4, AbsoluteY),
    Opcode::new(0xe1, Sbc, 6, IndirectX),
    Opcode::new(0xf1, Sbc, 5, IndirectY),
    // -- logical --
    Opcode::new(0x29, And, 2, Immediate),
    Opcode::new(0x25, And, 3, ZeroPage),
    Opcode::new(0x35, And, 4, ZeroPageX),
    Opcode::new(0x2d, And, 4, Absolute),
    Opcode::new(0x3d, And, 4, AbsoluteX),
    Opcode::new(0x39, And, 4, AbsoluteY),
    Opcode::new(0x21, And, 6, IndirectX),
    Opcode::new(0x31, And, 5, IndirectY),
    Opcode::new(0x49, Eor, 2, Immediate),
    Opcode::new(0x45, Eor, 3, ZeroPage),
    Opcode::new(0x55, Eor, 4, ZeroPageX),
    Opcode::new(0x4d, Eor, 4, Absolute),
    Opcode::new(0x5d, Eor, 4, AbsoluteX),
    Opcode::new(0x59, Eor, 4, AbsoluteY),
    Opcode::new(0x41, Eor, 6, IndirectX),
    Opcode::new(0x51, Eor, 5, IndirectY),
    Opcode::new(0x09, Ora, 2, Immediate),
    Opcode::new(0x05, Ora, 3, ZeroPage),
    Opcode::new(0x15, Ora, 4, ZeroPageX),
    Opcode::new(0x0d, Ora, 4, Absolute),
    Opcode::new(0x1d, Ora, 4, AbsoluteX),
    Opcode::new(0x19, Ora, 4, AbsoluteY),
    Opcode::new(0x01, Ora, 6, IndirectX),
    Opcode::new(0x11, Ora, 5, IndirectY),
    Opcode::new(0x24, Bit, 3, ZeroPage),
    Opcode::new(0x2c, Bit, 4, Absolute),
    // -- shifts and rotations --
    Opcode::new(0x0a, Asl, 2, Accumulator),
    Opcode::new(0x06, Asl, 5, ZeroPage),
    Opcode::new(0x16, Asl, 6, ZeroPageX),
    Opcode::new(0x0e, Asl, 6, Absolute),
    Opcode::new(0x1e, Asl, 7, AbsoluteX),
    Opcode::new(0x4a, Lsr, 2, Accumulator),
    Opcode::new(0x46, Lsr, 5, ZeroPage),
    Opcode::new(0x56, Lsr, 6, ZeroPageX),
    Opcode::new(0x4e, Lsr, 6, Absolute),
    Opcode::new(0x5e, Lsr, 7, AbsoluteX),
    Opcode::new(0x2a, Rol, 2, Accumulator),
    Opcode::new(0x26, Rol, 5, ZeroPage),
    Opcode::new(0x36, Rol, 6, ZeroPageX),
    Opcode::new(0x2e, Rol, 6, Absolute),
    Opcode::new(0x3e, Rol, 7, AbsoluteX),
    Opcode::new(0x6a, Ror, 2, Accumulator),
    Opcode::new(0x66, Ror, 5, ZeroPage),
    Opcode::new(0x76, Ror, 6, ZeroPageX),
    Opcode::new(0x6e, Ror, 6, Absolute),
    Opcode::new(0x7e, Ror, 7, AbsoluteX),
    // -- branches --
    Opcode::new(0x90, Bcc, 2, Relative),
    Opcode::new(0xb0, Bcs, 2, Relative),
    Opcode::new(0xf0, Beq, 2, Relative),
    Opcode::new(0x30, Bmi, 2, Relative),
    Opcode::new(0xd0, Bne, 2, Relative),
    Opcode::new(0x10, Bpl, 2, Relative),
    Opcode::new(0x50, Bvc, 2, Relative),
    Opcode::new(0x70, Bvs, 2, Relative),
    // -- flag clear/set instructions --
    Opcode::new(0x18, Clc, 2, Implied),
    Opcode::new(0xd8, Cld, 2, Implied),
    Opcode::new(0x58, Cli, 2, Implied),
    Opcode::new(0xb8, Clv, 2, Implied),
    Opcode::new(0x38, Sec, 2, Implied),
    Opcode::new(0xf8, Sed, 2, Implied),
    Opcode::new(0x78, Sei, 2, Implied),
    // -- comparisons --
    Opcode::new(0xc9, Cmp, 2, Immediate),
    Opcode::new(0xc5, Cmp, 3, ZeroPage),
    Opcode::new(0xd5, Cmp, 4, ZeroPageX),
    Opcode::new(0xcd, Cmp, 4, Absolute),
    Opcode::new(0xdd, Cmp, 4, AbsoluteX),
    Opcode::new(0xd9, Cmp, 4, AbsoluteY),
    Opcode::new(0xc1, Cmp, 6, IndirectX),
    Opcode::new(0xd1, Cmp, 5, IndirectY),
    Opcode::new(0xe0, Cpx, 2, Immediate),
    Opcode::new(0xe4, Cpx, 3, ZeroPage),
    Opcode::new(0xec, Cpx, 4, Absolute),
    Opcode::new(0xc0, Cpy, 2, Immediate),
    Opcode::new(0xc4, Cpy, 3, ZeroPage),
    Opcode::new(0xcc, Cpy, 4, Absolute),
    // -- increments and decrements --
    Opcode::new(0xe6, Inc, 5, ZeroPage),
    Opcode::new(0xf6, Inc, 6, ZeroPageX),
    Opcode::new(0xee, Inc, 6, Absolute),
    Opcode::new(0xfe, Inc, 7, AbsoluteX),
    Opcode::new(0xc6, Dec, 5, ZeroPage),
    Opcode::new(0xd6, Dec, 6, ZeroPageX),
    Opcode::new(0xce, Dec, 6, Absolute),
    Opcode::new(0xde, Dec, 7, AbsoluteX),
    Opcode::new(0xe8, Inx, 2, Implied),
    Opcode::new(0xc8, Iny, 2, Implied),
    Opcode::new(0xca, Dex, 2, Implied),
    Opcode::new(0x88, Dey, 2, Implied),
    // -- jumps and subroutines --
    Opcode::new(0x4c, Jmp, 3, Absolute),
    Opcode::new(0x6c, Jmp, 5, Indirect),
    Opcode::new(0x20, Jsr, 6, Absolute),
    Opcode::new(0x60, Rts, 6, Implied),
    Opcode::new(0x40, Rti, 6, Implied),
    // -- load/set instructions --
    Opcode::new(0xa9, Lda, 2, Immediate),
    Opcode::new(0xa5, Lda, 3, ZeroPage),
    Opcode::new(0xb5, Lda, 4, ZeroPageX),
    Opcode::new(0xad, Lda, 4, Absolute),
    Opcode::new(0xbd, Lda, 4, AbsoluteX),
    Opcode::new(0xb9, Lda, 4, AbsoluteY),
    Opcode::new(0xa1, Lda, 6, IndirectX),
    Opcode::new(0xb1, Lda, 5, IndirectY),
    Opcode::new(0xa2, Ldx, 2, Immediate),
    Opcode::new(0xa6, Ldx, 3, ZeroPage),
    Opcode::new(0xb6, Ldx, 4, ZeroPageY),
    Opcode::new(0xae, Ldx, 4, Absolute),
    Opcode::new(0xbe, Ldx, 4, AbsoluteY),
    Opcode::new(0xa0, Ldy, 2, Immediate),
    Opcode::new(0xa4, Ldy, 3, ZeroPage),
    Opcode::new(0xb4, Ldy, 4, ZeroPageX),
    Opcode::new(0xac, Ldy, 4, Absolute),
    Opcode::new(0xbc, Ldy, 4, AbsoluteX),
    Opcode::new(0x85, Sta, 3, ZeroPage),
    Opcode::new(0x95, Sta, 4, ZeroPageX),
    Opcode::new(0x8d, Sta, 4, Absolute),
    Opcode::new(0x9d, Sta, 5, AbsoluteX),
    Opcode::new(0x99, Sta, 5, AbsoluteY),
    Opcode::new(0x81, Sta, 6, IndirectX),
    Opcode::new(0x91, Sta, 6, IndirectY),
    Opcode::new(0x86, Stx, 3, ZeroPage),
    Opcode::new(0x96, Stx, 4, ZeroPageY),
    Opcode::new(0x8e, Stx, 4, Absolute),
    Opcode::new(0x84, Sty, 3, ZeroPage),
    Opcode::new(0x94, Sty, 4, ZeroPageX),
    Opcode::new(0x8c, Sty, 4, Absolute),
    // -- stack --
    Opcode::new(0x48, Pha, 3, Implied),
    Opcode::new(0x08, Php, 3, Implied),
    Opcode::new(0x68, Pla, 4, Implied),
    Opcode::new(0x28, Plp, 4, Implied),
    // -- transfer instructions --
    Opcode::new(0xaa, Tax, 2, Implied),
    Opcode::new(0xa8, Tay, 2, Implied),
    Opcode::new(0xba, Tsx, 2, Implied),
    Opcode::new(0x8a, Txa, 2, Implied),
    Opcode::new(0x9a, Txs, 2, Implied),
    Opcode::new(0x98, Tya, 2, Implied),
];

pub static OPCODE_TABLE: Lazy<[Opcode; 256]> = Lazy::new(|| {
    let mut table: [Opcode; 256] = std::array::from_fn(|code| Opcode::undefined(code as Byte));

    for opcode in OPCODES {
        table[opcode.code as usize] = *opcode;
    }

    table
});
