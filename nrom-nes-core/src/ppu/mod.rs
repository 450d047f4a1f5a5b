mod nmi_status;
pub mod registers;

pub use nmi_status::NmiStatus;

use crate::ppu::registers::{PpuRegisters, OAM_SIZE};
use crate::render::palette::ColorTable;
use crate::render::{self, Frame};
use crate::utils::MirroredAddress;
use crate::{Address, Byte};

pub const CHR_SIZE: usize = 0x2000;
const VRAM_SIZE: usize = 2048;
const PALETTE_TABLE_SIZE: usize = 32;

const NAMETABLES_START: Address = 0x2000;
const PALETTES_START: Address = 0x3f00;

#[derive(Debug, Clone)]
pub struct Ppu {
    /// Pattern tables (tile bitmaps) from the cartridge, writable through $2007
    pub chr: Vec<Byte>,
    /// Background palettes (0x00..0x10) followed by sprite palettes (0x10..0x20)
    pub palette_table: [Byte; PALETTE_TABLE_SIZE],
    /// 2KiB of space to hold background information
    pub vram: [Byte; VRAM_SIZE],

    pub registers: PpuRegisters,

    internal_data_buffer: Byte,
    colors: &'static ColorTable,
}

impl Ppu {
    pub fn new(chr: &[Byte], colors: &'static ColorTable) -> Self {
        let mut pattern_tables = vec![0; CHR_SIZE];
        let len = chr.len().min(CHR_SIZE);
        pattern_tables[..len].copy_from_slice(&chr[..len]);

        Self {
            chr: pattern_tables,
            palette_table: [0; PALETTE_TABLE_SIZE],
            vram: [0; VRAM_SIZE],
            registers: PpuRegisters::default(),
            internal_data_buffer: 0,
            colors,
        }
    }

    /// Clears registers, OAM, nametables, palettes and the read buffer.
    /// Pattern tables belong to the cartridge and the color table is fixed
    /// for the process, so both survive.
    pub fn reset(&mut self) {
        self.palette_table = [0; PALETTE_TABLE_SIZE];
        self.vram = [0; VRAM_SIZE];
        self.registers = PpuRegisters::default();
        self.internal_data_buffer = 0;
    }

    pub fn colors(&self) -> &'static ColorTable {
        self.colors
    }

    /// Draws the whole frame, then enters vblank.
    /// Returns whether the CPU should take an NMI.
    pub fn render_frame(&mut self, frame: &mut Frame) -> NmiStatus {
        render::render(self, frame);
        self.registers.set_vblank();

        if self.registers.is_generating_nmi() {
            NmiStatus::Active
        } else {
            NmiStatus::Inactive
        }
    }

    pub fn read_status_register(&mut self) -> Byte {
        self.registers.read_status()
    }

    pub fn read_oam_data(&self) -> Byte {
        self.registers.read_oam_data()
    }

    pub fn write_to_addr_register(&mut self, value: Byte) {
        self.registers.write_address(value);
    }

    pub fn write_to_control_register(&mut self, value: Byte) {
        self.registers.write_control(value);
    }

    pub fn write_to_mask_register(&mut self, value: Byte) {
        self.registers.write_mask(value);
    }

    pub fn write_to_oam_address_register(&mut self, value: Byte) {
        self.registers.write_oam_address(value);
    }

    pub fn write_to_oam_data(&mut self, value: Byte) {
        self.registers.write_oam_data(value);
    }

    pub fn write_to_oam_dma(&mut self, buffer: &[Byte; OAM_SIZE]) {
        self.registers.write_oam_dma(buffer);
    }

    pub fn write_to_scroll_register(&mut self, value: Byte) {
        self.registers.write_scroll(value);
    }

    /// $2007 write: stores immediately, then advances the VRAM pointer
    pub fn write(&mut self, value: Byte) {
        let addr = self.registers.read_address();
        self.write_vram(addr, value);
        self.registers.increment_vram_address();
    }

    /// $2007 read. Below palette space the result lags one read behind;
    /// palette reads are immediate and refill the buffer from the nametable
    /// underneath ($1000 lower).
    pub fn read(&mut self) -> Byte {
        let addr = self.registers.read_address().mirror_vram_addr();
        let value = self.read_vram(addr);

        let result = if addr < PALETTES_START {
            std::mem::replace(&mut self.internal_data_buffer, value)
        } else {
            self.internal_data_buffer = self.read_vram(addr - 0x1000);
            value
        };

        self.registers.increment_vram_address();

        result
    }

    pub fn read_vram(&self, addr: Address) -> Byte {
        let addr = addr.mirror_vram_addr();

        match addr {
            0..NAMETABLES_START => self.chr[addr as usize],
            NAMETABLES_START..PALETTES_START => self.vram[addr.mirror_nametable_addr() as usize],
            PALETTES_START.. => self.palette_table[palette_index(addr)],
        }
    }

    pub fn write_vram(&mut self, addr: Address, value: Byte) {
        let addr = addr.mirror_vram_addr();

        match addr {
            0..NAMETABLES_START => self.chr[addr as usize] = value,
            NAMETABLES_START..PALETTES_START => {
                self.vram[addr.mirror_nametable_addr() as usize] = value;
            }
            PALETTES_START.. => self.palette_table[palette_index(addr)] = value & 0x3f,
        }
    }
}

fn palette_index(addr: Address) -> usize {
    (addr & 0x1f) as usize
}
