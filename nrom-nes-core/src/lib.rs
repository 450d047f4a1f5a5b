pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod input;
mod interrupts;
pub mod nes;
pub mod ppu;
pub mod render;
mod utils;

pub use anyhow::{Error, Result};
pub use bus::Bus;
pub use cartridge::{Rom, RomError};
pub use cpu::{Cpu, Memory};
pub use input::joypad::JoypadButton;
pub use nes::Nes;

pub type Byte = u8;
pub type Address = u16;
