mod rom;

pub use rom::Rom;

use derive_more::{Display, Error};

pub const PRG_ROM_BANK_SIZE: usize = 16384;
pub const CHR_ROM_BANK_SIZE: usize = 8192;

/// Section of an iNES image, used to report which part is cut short
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum RomSection {
    #[display("header")]
    Header,
    #[display("PRG ROM")]
    PrgRom,
    #[display("CHR ROM")]
    ChrRom,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum RomError {
    #[display("Bad iNES magic, expected 'NES' followed by 0x1a")]
    BadMagic,
    #[display(
        "Unsupported ROM size ({prg_banks} PRG banks, {chr_banks} CHR banks), only 2 x 16KiB PRG + 1 x 8KiB CHR is supported"
    )]
    UnsupportedSize { prg_banks: usize, chr_banks: usize },
    #[display("Unsupported mapper (ID: {mapper}), only mapper 0 (NROM) is supported")]
    UnsupportedMapper { mapper: u8 },
    #[display("Truncated ROM image, not enough bytes for {section}")]
    Truncated { section: RomSection },
}
