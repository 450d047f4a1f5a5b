use crate::Byte;
use crate::cartridge::{CHR_ROM_BANK_SIZE, PRG_ROM_BANK_SIZE, RomError, RomSection};
use bitflags::bitflags;
use log::info;

/// "NES" followed by MS-DOS end-of-file used to recognize .NES (iNES) files
const NES_TAG: [Byte; 4] = [0x4e, 0x45, 0x53, 0x1a];
const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;

const SUPPORTED_PRG_BANKS: usize = 2;
const SUPPORTED_CHR_BANKS: usize = 1;

bitflags! {
    #[derive(Debug, Copy, Clone)]
    struct ControlByte1: Byte {
        const MIRRORING               = 0b0000_0001; // ignored, mirroring is fixed
        const BATTERY_BACKED_RAM      = 0b0000_0010;
        const HAS_TRAINER             = 0b0000_0100;
        const FOUR_SCREEN_VRAM_LAYOUT = 0b0000_1000;
        const MAPPER_MASK             = 0b1111_0000; // low nibble of the mapper id
    }
}

impl ControlByte1 {
    fn mapper_bits_lo(&self) -> Byte {
        self.bits() >> 4
    }
}

bitflags! {
    #[derive(Debug, Copy, Clone)]
    struct ControlByte2: Byte {
        const MAPPER_MASK = 0b1111_0000; // high nibble of the mapper id
    }
}

impl ControlByte2 {
    fn mapper_bits_hi(&self) -> Byte {
        (*self & Self::MAPPER_MASK).bits()
    }
}

#[derive(Debug)]
struct RomHeader {
    /// Number of 16kB ROM banks (PRG ROM)
    prg_rom_banks: usize,
    /// Number of 8kB VROM banks (CHR ROM)
    chr_rom_banks: usize,
    control_byte1: ControlByte1,
    control_byte2: ControlByte2,
}

impl TryFrom<&[Byte]> for RomHeader {
    type Error = RomError;

    fn try_from(data: &[Byte]) -> Result<Self, Self::Error> {
        let header = data.get(0..HEADER_SIZE).ok_or(RomError::Truncated {
            section: RomSection::Header,
        })?;

        if header[0..4] != NES_TAG {
            return Err(RomError::BadMagic);
        }

        Ok(Self {
            prg_rom_banks: header[4].into(),
            chr_rom_banks: header[5].into(),
            control_byte1: ControlByte1::from_bits_retain(header[6]),
            control_byte2: ControlByte2::from_bits_retain(header[7]),
        })
    }
}

impl RomHeader {
    fn mapper(&self) -> Byte {
        self.control_byte2.mapper_bits_hi() | self.control_byte1.mapper_bits_lo()
    }

    fn has_trainer(&self) -> bool {
        self.control_byte1.contains(ControlByte1::HAS_TRAINER)
    }

    fn validate(&self) -> Result<(), RomError> {
        if self.prg_rom_banks != SUPPORTED_PRG_BANKS || self.chr_rom_banks != SUPPORTED_CHR_BANKS {
            return Err(RomError::UnsupportedSize {
                prg_banks: self.prg_rom_banks,
                chr_banks: self.chr_rom_banks,
            });
        }

        match self.mapper() {
            0 => Ok(()),
            mapper => Err(RomError::UnsupportedMapper { mapper }),
        }
    }
}

/// Parsed NROM-256 cartridge: 32KiB of PRG ROM and 8KiB of CHR ROM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    pub prg_rom: Vec<Byte>,
    pub chr_rom: Vec<Byte>,
}

impl Rom {
    pub fn new(data: &[Byte]) -> Result<Self, RomError> {
        let header = RomHeader::try_from(data)?;
        header.validate()?;

        let prg_rom_size = header.prg_rom_banks * PRG_ROM_BANK_SIZE;
        let chr_rom_size = header.chr_rom_banks * CHR_ROM_BANK_SIZE;
        let prg_rom_start = HEADER_SIZE + header.has_trainer() as usize * TRAINER_SIZE;
        let chr_rom_start = prg_rom_start + prg_rom_size;

        let prg_rom: Vec<_> = data
            .get(prg_rom_start..(prg_rom_start + prg_rom_size))
            .ok_or(RomError::Truncated {
                section: RomSection::PrgRom,
            })?
            .into();
        let chr_rom: Vec<_> = data
            .get(chr_rom_start..(chr_rom_start + chr_rom_size))
            .ok_or(RomError::Truncated {
                section: RomSection::ChrRom,
            })?
            .into();

        info!(
            "Loaded NROM cartridge: {} PRG banks, {} CHR banks, trainer: {}",
            header.prg_rom_banks,
            header.chr_rom_banks,
            header.has_trainer()
        );

        Ok(Self { prg_rom, chr_rom })
    }
}
