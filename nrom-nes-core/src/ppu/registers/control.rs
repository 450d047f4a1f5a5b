//! 7  bit  0
//! ---- ----
//! VPHB SINN
//! |||| ||||
//! |||| ||++- Base nametable address (0 = $2000; 1 = $2400; 2 = $2800; 3 = $2C00)
//! |||| |+--- VRAM address increment per CPU read/write of PPUDATA (0: add 1; 1: add 32)
//! |||| +---- Sprite pattern table address for 8x8 sprites (0: $0000; 1: $1000)
//! |||+------ Background pattern table address (0: $0000; 1: $1000)
//! ||+------- Sprite size (0: 8x8 pixels; 1: 8x16 pixels)
//! |+-------- PPU master/slave select
//! +--------- Generate an NMI at the start of the vertical blanking interval

use crate::{Address, Byte};
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct ControlRegister: Byte {
        const NAMETABLE1              = 0b0000_0001;
        const NAMETABLE2              = 0b0000_0010;
        const VRAM_ADDR_INCREMENT     = 0b0000_0100;
        const SPRITE_PATTERN_ADDR     = 0b0000_1000;
        const BACKGROUND_PATTERN_ADDR = 0b0001_0000;
        const SPRITE_SIZE             = 0b0010_0000;
        const MASTER_SLAVE_SELECT     = 0b0100_0000;
        const GENERATE_NMI            = 0b1000_0000;
    }
}

impl ControlRegister {
    pub fn update(&mut self, value: Byte) {
        *self = Self::from_bits_retain(value);
    }

    pub fn vram_addr_increment(&self) -> Address {
        if self.contains(Self::VRAM_ADDR_INCREMENT) {
            32
        } else {
            1
        }
    }

    pub fn background_pattern_address(&self) -> Address {
        self.contains(Self::BACKGROUND_PATTERN_ADDR) as Address * 0x1000
    }

    /// Pattern table for 8x8 sprites; 8x16 sprites pick theirs from the tile index
    pub fn sprite_pattern_address(&self) -> Address {
        self.contains(Self::SPRITE_PATTERN_ADDR) as Address * 0x1000
    }

    pub fn sprite_height(&self) -> usize {
        if self.contains(Self::SPRITE_SIZE) {
            16
        } else {
            8
        }
    }

    /// Horizontal offset of the selected base nametable in the two-table layout
    pub fn nametable_x_offset(&self) -> usize {
        self.contains(Self::NAMETABLE1) as usize * 256
    }

    pub fn is_generating_nmi(&self) -> bool {
        self.contains(Self::GENERATE_NMI)
    }
}
