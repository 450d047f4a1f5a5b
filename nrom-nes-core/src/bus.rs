use crate::cartridge::Rom;
use crate::input::joypad::{Joypad, JoypadButton};
use crate::ppu::registers::OAM_SIZE;
use crate::ppu::Ppu;
use crate::render::palette::ColorTable;
use crate::utils::MirroredAddress;
use crate::{Address, Byte, Memory};
use log::debug;

const VRAM_SIZE: usize = 2048;
const RAM: Address = 0x0000;
const RAM_MIRRORS_END: Address = 0x1fff;
const PPU_REGISTERS: Address = 0x2000;
const PPU_REGISTERS_MIRRORS_END: Address = 0x3fff;
const OAM_DMA: Address = 0x4014;
const JOYPAD_1: Address = 0x4016;
const ROM_START: Address = 0x8000;
const ROM_END: Address = 0xffff;

/// CPU address space: work RAM, PPU registers, controller port and PRG ROM
#[derive(Debug)]
pub struct Bus {
    cpu_vram: [Byte; VRAM_SIZE],
    prg_rom: Vec<Byte>,
    ppu: Ppu,
    joypad: Joypad,
}

impl Bus {
    pub fn new(rom: Rom, colors: &'static ColorTable) -> Self {
        let ppu = Ppu::new(&rom.chr_rom, colors);

        Self {
            cpu_vram: [0; VRAM_SIZE],
            prg_rom: rom.prg_rom,
            ppu,
            joypad: Joypad::default(),
        }
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn set_buttons(&mut self, buttons: JoypadButton) {
        self.joypad.set_buttons(buttons);
    }

    fn read_prg_rom(&self, addr: Address) -> Byte {
        self.prg_rom
            .get((addr - ROM_START) as usize)
            .copied()
            .unwrap_or_default()
    }

    fn read_ppu_register(&mut self, addr: Address) -> Byte {
        match addr.mirror_ppu_register_addr() {
            0x2002 => self.ppu.read_status_register(),
            0x2004 => self.ppu.read_oam_data(),
            0x2007 => self.ppu.read(),
            // write-only registers
            _ => 0,
        }
    }

    fn write_ppu_register(&mut self, addr: Address, value: Byte) {
        match addr.mirror_ppu_register_addr() {
            0x2000 => self.ppu.write_to_control_register(value),
            0x2001 => self.ppu.write_to_mask_register(value),
            0x2003 => self.ppu.write_to_oam_address_register(value),
            0x2004 => self.ppu.write_to_oam_data(value),
            0x2005 => self.ppu.write_to_scroll_register(value),
            0x2006 => self.ppu.write_to_addr_register(value),
            0x2007 => self.ppu.write(value),
            status => debug!("Ignoring write of {value:#04x} to read-only PPU status ({status:#06x})"),
        }
    }

    fn oam_dma(&mut self, page: Byte) {
        let hi = (page as Address) << 8;
        let mut buffer = [0; OAM_SIZE];

        for (offset, byte) in (0..).zip(buffer.iter_mut()) {
            *byte = self.read(hi.wrapping_add(offset));
        }

        self.ppu.write_to_oam_dma(&buffer);
    }
}

impl Memory for Bus {
    fn read(&mut self, addr: Address) -> Byte {
        match addr {
            RAM..=RAM_MIRRORS_END => self.cpu_vram[addr.mirror_cpu_ram_addr() as usize],
            PPU_REGISTERS..=PPU_REGISTERS_MIRRORS_END => self.read_ppu_register(addr),
            JOYPAD_1 => self.joypad.read(),
            ROM_START..=ROM_END => self.read_prg_rom(addr),
            _ => 0,
        }
    }

    fn write(&mut self, addr: Address, value: Byte) {
        match addr {
            RAM..=RAM_MIRRORS_END => {
                self.cpu_vram[addr.mirror_cpu_ram_addr() as usize] = value;
            }
            PPU_REGISTERS..=PPU_REGISTERS_MIRRORS_END => self.write_ppu_register(addr, value),
            OAM_DMA => self.oam_dma(value),
            JOYPAD_1 => self.joypad.write(value),
            ROM_START..=ROM_END => {
                debug!("Ignoring write of {value:#04x} to cartridge ROM ({addr:#06x})");
            }
            _ => {}
        }
    }

    fn peek(&self, addr: Address) -> Byte {
        match addr {
            RAM..=RAM_MIRRORS_END => self.cpu_vram[addr.mirror_cpu_ram_addr() as usize],
            ROM_START..=ROM_END => self.read_prg_rom(addr),
            _ => 0,
        }
    }
}
