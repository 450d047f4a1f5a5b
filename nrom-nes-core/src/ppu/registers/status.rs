//! 7  bit  0
//! ---- ----
//! VSO. ....
//! |||| ||||
//! |||+-++++- Unused
//! ||+------- Sprite overflow (never set, sprites are not evaluated per scanline)
//! |+-------- Sprite 0 hit (never set)
//! +--------- Vertical blank has started. Set after every rendered frame,
//!            cleared by reading $2002.

use crate::Byte;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct StatusRegister: Byte {
        const SPRITE_OVERFLOW = 0b0010_0000;
        const SPRITE_ZERO_HIT = 0b0100_0000;
        const VBLANK_STARTED  = 0b1000_0000;
    }
}

impl StatusRegister {
    pub fn set_vblank(&mut self) {
        self.insert(Self::VBLANK_STARTED);
    }

    pub fn reset_vblank(&mut self) {
        self.remove(Self::VBLANK_STARTED);
    }
}
