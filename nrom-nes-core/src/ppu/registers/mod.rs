mod address;
mod control;
mod mask;
mod oam;
mod scroll;
mod status;

use crate::{Address, Byte};
pub use address::AddressRegister;
pub use control::ControlRegister;
pub use mask::MaskRegister;
pub use oam::{SpriteData, OAM_SIZE};
use oam::Oam;
pub use scroll::ScrollRegister;
pub use status::StatusRegister;

#[derive(Debug, Default, Clone)]
pub struct PpuRegisters {
    address: AddressRegister,
    pub control: ControlRegister,
    pub mask: MaskRegister,
    pub scroll: ScrollRegister,
    status: StatusRegister,
    oam: Oam,
}

impl PpuRegisters {
    pub fn read_address(&self) -> Address {
        self.address.get()
    }

    pub fn temp_address(&self) -> Address {
        self.address.temp()
    }

    pub fn fine_x(&self) -> Byte {
        self.address.fine_x()
    }

    pub fn read_oam_data(&self) -> Byte {
        self.oam.read()
    }

    pub fn sprites(&self) -> impl DoubleEndedIterator<Item = SpriteData> + '_ {
        self.oam.sprites()
    }

    /// Reading $2002 clears vblank and the shared write toggle
    pub fn read_status(&mut self) -> Byte {
        let status = self.status.bits();

        self.status.reset_vblank();
        self.address.reset_latch();

        status
    }

    pub fn write_address(&mut self, value: Byte) {
        self.address.update(value);
    }

    pub fn write_control(&mut self, value: Byte) {
        self.control.update(value);
        self.address.set_nametable(value);
    }

    pub fn write_mask(&mut self, value: Byte) {
        self.mask.update(value);
    }

    pub fn write_oam_address(&mut self, value: Byte) {
        self.oam.write_address(value);
    }

    pub fn write_oam_data(&mut self, value: Byte) {
        self.oam.write(value);
    }

    pub fn write_oam_dma(&mut self, buffer: &[Byte; OAM_SIZE]) {
        self.oam.write_all(buffer);
    }

    pub fn write_scroll(&mut self, value: Byte) {
        if self.address.update_scroll(value) {
            self.scroll.scroll_x = value;
        } else {
            self.scroll.scroll_y = value;
        }
    }

    pub fn set_vblank(&mut self) -> &mut Self {
        self.status.set_vblank();
        self
    }

    pub fn is_generating_nmi(&self) -> bool {
        self.control.is_generating_nmi()
    }

    pub fn is_in_vblank(&self) -> bool {
        self.status.contains(StatusRegister::VBLANK_STARTED)
    }

    pub fn increment_vram_address(&mut self) {
        self.address.increment(self.control.vram_addr_increment());
    }
}
