mod config;
mod screenshot;

use anyhow::Context;
use clap::Parser;
use log::info;
use nrom_nes_core::input::InputScript;
use nrom_nes_core::{Nes, Result};

use crate::config::Config;

use std::time::{Duration, Instant};

/// NTSC frame period
const FRAME_DURATION: Duration = Duration::from_micros(16_639);

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();

    let game_bytes = std::fs::read(&config.rom_path)
        .with_context(|| format!("cannot read {}", config.rom_path.display()))?;
    let mut nes = Nes::load(&game_bytes)
        .with_context(|| format!("cannot load {}", config.rom_path.display()))?;
    nes.set_trace(config.trace);

    let script = InputScript::new(config.presses.iter().copied());
    run(&mut nes, &script, config.frames, config.realtime);
    info!("Ran {} frames", nes.frame_count());

    if let Some(path) = &config.screenshot {
        screenshot::save(&nes, path)?;
        info!("Saved screenshot to {}", path.display());
    }

    Ok(())
}

fn run(nes: &mut Nes, script: &InputScript, frames: u64, realtime: bool) {
    for _ in 0..frames {
        let started = Instant::now();

        nes.set_buttons(script.buttons_at(nes.frame_count()));
        nes.run_frame();

        if realtime {
            if let Some(rest) = FRAME_DURATION.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
}
