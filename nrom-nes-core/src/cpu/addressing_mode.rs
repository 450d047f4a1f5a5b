#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressingMode {
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// Pre-indexed indirect, `(zp,X)`
    IndirectX,
    /// Post-indexed indirect, `(zp),Y`
    IndirectY,
    Implied,
    Accumulator,
    Relative,
    Indirect,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndirectX
            | Self::IndirectY
            | Self::Relative => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }
}
