//! "Loopy" VRAM address model shared by $2005 (scroll) and $2006 (address).
//!
//! ```text
//! yyy NN YYYYY XXXXX
//! ||| || ||||| +++++-- coarse X scroll
//! ||| || +++++-------- coarse Y scroll
//! ||| ++-------------- nametable select
//! +++----------------- fine Y scroll
//! ```
//! - [PPU scrolling](https://www.nesdev.org/wiki/PPU_scrolling)

use crate::{Address, Byte};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AddressRegister {
    /// Active VRAM pointer (`v`)
    vram_addr: Address,
    /// Temporary address assembled by the two-phase writes (`t`)
    temp_addr: Address,
    fine_x: Byte,
    /// Write toggle, `true` once the first half of a two-phase write happened
    latch: bool,
}

impl AddressRegister {
    pub fn get(&self) -> Address {
        self.vram_addr
    }

    pub fn temp(&self) -> Address {
        self.temp_addr
    }

    pub fn fine_x(&self) -> Byte {
        self.fine_x
    }

    pub fn reset_latch(&mut self) {
        self.latch = false;
    }

    pub fn increment(&mut self, increment: Address) {
        self.vram_addr = self.vram_addr.wrapping_add(increment);
    }

    /// Control register writes copy the nametable select bits into `t`
    pub fn set_nametable(&mut self, control: Byte) {
        self.temp_addr = (self.temp_addr & 0xf3ff) | ((control as Address & 0b11) << 10);
    }

    /// $2006 write: high 6 bits first, then the low byte, which also commits `t` into `v`
    pub fn update(&mut self, value: Byte) {
        let value = value as Address;

        if self.latch {
            self.temp_addr = (self.temp_addr & 0xff00) | value;
            self.vram_addr = self.temp_addr;
        } else {
            self.temp_addr = (self.temp_addr & 0x00ff) | ((value & 0x3f) << 8);
        }

        self.latch = !self.latch;
    }

    /// $2005 write: coarse/fine X first, then coarse/fine Y.
    /// Returns `true` when this write was the X half.
    pub fn update_scroll(&mut self, value: Byte) -> bool {
        let is_x = !self.latch;
        let value16 = value as Address;

        if is_x {
            self.fine_x = value & 0b111;
            self.temp_addr = (self.temp_addr & 0xffe0) | (value16 >> 3);
        } else {
            self.temp_addr = (self.temp_addr & 0x8fff) | ((value16 & 0b111) << 12);
            self.temp_addr = (self.temp_addr & 0xfc1f) | ((value16 & 0xf8) << 2);
        }

        self.latch = !self.latch;

        is_x
    }
}
