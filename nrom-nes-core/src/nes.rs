//! The whole console: CPU, bus (RAM, PPU, controller, PRG) and the last rendered frame.
//!
//! Timing is frame based: the CPU runs for a fixed NTSC cycle budget, then the
//! PPU draws the complete picture in one go and raises vblank.

use crate::bus::Bus;
use crate::cartridge::Rom;
use crate::cpu::trace::trace;
use crate::cpu::Cpu;
use crate::input::joypad::JoypadButton;
use crate::render::palette::{ColorTable, SYSTEM_PALETTE};
use crate::render::Frame;
use crate::{Byte, Result};
use log::trace;

/// 1.789773 MHz / 60.0988 Hz
pub const CPU_CYCLES_PER_FRAME: usize = 29_780;

#[derive(Debug)]
pub struct Nes {
    cpu: Cpu<Bus>,
    frame: Frame,
    frame_count: u64,
    trace_instructions: bool,
}

impl Nes {
    /// Powers the console on with `rom` inserted: PPU reset first, then CPU reset
    pub fn new(rom: Rom) -> Self {
        Self::with_colors(rom, &SYSTEM_PALETTE)
    }

    pub fn with_colors(rom: Rom, colors: &'static ColorTable) -> Self {
        let mut cpu = Cpu::new(Bus::new(rom, colors));
        cpu.bus_mut().ppu_mut().reset();
        cpu.reset();

        Self {
            cpu,
            frame: Frame::default(),
            frame_count: 0,
            trace_instructions: false,
        }
    }

    /// Parses an iNES image and powers the console on
    pub fn load(data: &[Byte]) -> Result<Self> {
        let rom = Rom::new(data)?;

        Ok(Self::new(rom))
    }

    pub fn set_trace(&mut self, enabled: bool) {
        self.trace_instructions = enabled;
    }

    /// Controller snapshot for the next frame
    pub fn set_buttons(&mut self, buttons: JoypadButton) {
        self.cpu.bus_mut().set_buttons(buttons);
    }

    /// One CPU instruction (or NMI entry); returns the cycles it took
    pub fn step(&mut self) -> u8 {
        if self.trace_instructions {
            trace!("{}", trace(&self.cpu));
        }

        self.cpu.step()
    }

    /// Runs the CPU for one frame's worth of cycles, then renders.
    /// Returns the CPU cycles actually spent (the last instruction may overshoot).
    pub fn run_frame(&mut self) -> usize {
        let mut cycles = 0;
        while cycles < CPU_CYCLES_PER_FRAME {
            cycles += self.step() as usize;
        }

        self.render();

        cycles
    }

    fn render(&mut self) {
        let nmi = self.cpu.bus_mut().ppu_mut().render_frame(&mut self.frame);
        if nmi.is_active() {
            self.cpu.request_nmi();
        }

        self.frame_count += 1;
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn colors(&self) -> &'static ColorTable {
        self.cpu.bus().ppu().colors()
    }

    /// Frame as packed RGB24, using the console's color table
    pub fn frame_rgb(&self) -> Vec<Byte> {
        self.frame.to_rgb(self.colors())
    }

    pub fn cpu(&self) -> &Cpu<Bus> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu<Bus> {
        &mut self.cpu
    }
}
