//! Representation of a 6502 CPU status register (a.k.a. flag register or processor status)
//! It is composed of six one-bit registers. Instructions modify one or more bits and leave others unchanged.
//! Instructions that save or restore the flags map them to bits in the architectural 'P' register as follows:
//!
//! ```text
//! 7  bit  0
//! ---- ----
//! NVUB DIZC
//! |||| ||||
//! |||| |||+- Carry
//! |||| ||+-- Zero
//! |||| |+--- Interrupt Disable
//! |||| +---- Decimal (stored, but the 2A03 has no decimal mode)
//! |||+------ Break, only meaningful in the copy pushed by BRK/PHP
//! ||+------- Unused, always 1
//! |+-------- Overflow
//! +--------- Negative
//! ```
//! - [the B flag](https://wiki.nesdev.org/w/index.php/Status_flags#The_B_flag)

use crate::Byte;
use bitflags::bitflags;
use std::fmt::{Display, Formatter};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusRegister: Byte {
        const CARRY             = 0b0000_0001;
        const ZERO              = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL           = 0b0000_1000;
        const BREAK             = 0b0001_0000;
        const UNUSED            = 0b0010_0000;
        const OVERFLOW          = 0b0100_0000;
        const NEGATIVE          = 0b1000_0000;
    }
}

impl Default for StatusRegister {
    fn default() -> Self {
        Self::INTERRUPT_DISABLE | Self::UNUSED
    }
}

impl Display for StatusRegister {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X}", self.bits())
    }
}

impl From<Byte> for StatusRegister {
    fn from(value: Byte) -> Self {
        Self::from_bits_retain(value)
    }
}

impl StatusRegister {
    pub fn update_zero_and_negative_flags(&mut self, value: Byte) {
        self.set_zero_flag(value == 0);
        self.set_negative_flag(value & Self::NEGATIVE.bits() != 0);
    }

    /// Copy of the register as pushed onto the stack by BRK and PHP
    pub fn with_break_flag(self) -> Self {
        self | Self::BREAK | Self::UNUSED
    }

    /// Copy of the register as pushed onto the stack by NMI
    pub fn without_break_flag(self) -> Self {
        self - Self::BREAK
    }

    #[inline]
    pub fn carry(&self) -> Byte {
        self.contains(Self::CARRY).into()
    }

    #[inline]
    pub fn set_carry_flag(&mut self, value: bool) {
        self.set(Self::CARRY, value);
    }

    #[inline]
    pub fn set_decimal_flag(&mut self, value: bool) {
        self.set(Self::DECIMAL, value);
    }

    #[inline]
    pub fn set_interrupt_flag(&mut self, value: bool) {
        self.set(Self::INTERRUPT_DISABLE, value);
    }

    #[inline]
    pub fn set_overflow_flag(&mut self, value: bool) {
        self.set(Self::OVERFLOW, value);
    }

    #[inline]
    pub fn set_negative_flag(&mut self, value: bool) {
        self.set(Self::NEGATIVE, value);
    }

    #[inline]
    pub fn set_zero_flag(&mut self, value: bool) {
        self.set(Self::ZERO, value);
    }
}
