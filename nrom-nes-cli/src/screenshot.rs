//! PNG output of the last rendered frame.

use anyhow::Context;
use nrom_nes_core::render::Frame;
use nrom_nes_core::{Nes, Result};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn save(nes: &Nes, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("cannot create {}", path.display()))?;

    let mut encoder = png::Encoder::new(
        BufWriter::new(file),
        Frame::WIDTH as u32,
        Frame::HEIGHT as u32,
    );
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&nes.frame_rgb())?;
    writer.finish()?;

    Ok(())
}
