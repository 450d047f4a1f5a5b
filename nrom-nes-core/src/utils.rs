use crate::{Address, Byte};

pub trait NthBit {
    fn nth_bit(&self, bit_n: Self) -> bool;
}

pub trait MirroredAddress {
    fn mirror_cpu_ram_addr(&self) -> Self;
    fn mirror_ppu_register_addr(&self) -> Self;
    fn mirror_vram_addr(&self) -> Self;
    fn mirror_nametable_addr(&self) -> Self;
}

impl NthBit for Byte {
    #[inline]
    fn nth_bit(&self, bit_n: Self) -> bool {
        self >> bit_n & 1 == 1
    }
}

impl MirroredAddress for Address {
    /// 2KiB of work RAM repeated over 0x0000..=0x1fff
    fn mirror_cpu_ram_addr(&self) -> Self {
        self & 0b0000_0111_1111_1111
    }

    /// 8 PPU registers repeated over 0x2000..=0x3fff
    fn mirror_ppu_register_addr(&self) -> Self {
        0x2000 | (self & 0b0000_0000_0000_0111)
    }

    /// PPU address space is 14 bits wide
    fn mirror_vram_addr(&self) -> Self {
        self & 0b0011_1111_1111_1111
    }

    /// Single fixed layout: two physical nametables, picked by bit 10
    fn mirror_nametable_addr(&self) -> Self {
        self & 0b0000_0111_1111_1111
    }
}
