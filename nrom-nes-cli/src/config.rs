use clap::Parser;
use maplit::hashmap;
use nrom_nes_core::input::Press;
use nrom_nes_core::JoypadButton;
use once_cell::sync::Lazy;

use std::collections::HashMap;
use std::path::PathBuf;

static BUTTON_NAMES: Lazy<HashMap<&'static str, JoypadButton>> = Lazy::new(|| {
    hashmap! {
        "a" => JoypadButton::BUTTON_A,
        "b" => JoypadButton::BUTTON_B,
        "select" => JoypadButton::SELECT,
        "start" => JoypadButton::START,
        "up" => JoypadButton::UP,
        "down" => JoypadButton::DOWN,
        "left" => JoypadButton::LEFT,
        "right" => JoypadButton::RIGHT,
    }
});

/// Runs an NROM cartridge headless for a fixed number of frames
#[derive(Debug, Parser)]
#[command(name = "nrom-nes", version)]
pub struct Config {
    #[arg(long = "rom-path")]
    pub rom_path: PathBuf,
    #[arg(long, default_value_t = 600)]
    pub frames: u64,
    /// Write the last frame to this PNG file
    #[arg(long)]
    pub screenshot: Option<PathBuf>,
    /// Hold BUTTON during frames FROM..TO, e.g. `start@30..40`
    #[arg(long = "press", value_name = "BUTTON@FROM..TO", value_parser = parse_press)]
    pub presses: Vec<Press>,
    /// Pace frames to 60 Hz instead of running flat out
    #[arg(long)]
    pub realtime: bool,
    /// Log every executed instruction (needs RUST_LOG=trace)
    #[arg(long)]
    pub trace: bool,
}

fn parse_press(arg: &str) -> Result<Press, String> {
    let (name, frames) = arg
        .split_once('@')
        .ok_or_else(|| format!("expected BUTTON@FROM..TO, got `{arg}`"))?;
    let button = *BUTTON_NAMES
        .get(name.to_lowercase().as_str())
        .ok_or_else(|| format!("unknown button `{name}`"))?;
    let (from, to) = frames
        .split_once("..")
        .ok_or_else(|| format!("expected a frame range FROM..TO, got `{frames}`"))?;
    let from = from.parse().map_err(|e| format!("bad start frame `{from}`: {e}"))?;
    let to = to.parse().map_err(|e| format!("bad end frame `{to}`: {e}"))?;

    if to < from {
        return Err(format!("frame range {from}..{to} runs backwards"));
    }

    Ok(Press { button, from, to })
}
