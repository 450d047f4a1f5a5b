//! NES master palette: the 64 colors a 6-bit color index can select.

use crate::render::Rgb;
use once_cell::sync::Lazy;

pub type ColorTable = [Rgb; 64];

#[rustfmt::skip]
const NES_PALETTE_RGB: [u32; 64] = [
    0x545454, 0x001e74, 0x081090, 0x300088, 0x440064, 0x5c0030, 0x540400, 0x3c1800,
    0x202a00, 0x083a00, 0x004000, 0x003c00, 0x00323c, 0x000000, 0x000000, 0x000000,
    0x989698, 0x084cc4, 0x3032ec, 0x5c1ee4, 0x8814b0, 0xa01464, 0x982220, 0x783c00,
    0x545a00, 0x287200, 0x087c00, 0x007628, 0x006678, 0x000000, 0x000000, 0x000000,
    0xeceeec, 0x4c9aec, 0x787cec, 0xb062ec, 0xe454ec, 0xec58b4, 0xec6a64, 0xd48820,
    0xa0aa00, 0x74c400, 0x4cd020, 0x38cc6c, 0x38b4cc, 0x3c3c3c, 0x000000, 0x000000,
    0xeceeec, 0xa8ccec, 0xbcbcec, 0xd4b2ec, 0xecaeec, 0xecaed4, 0xecb4b0, 0xe4c490,
    0xccd278, 0xb4de78, 0xa8e290, 0x98e2b4, 0xa0d6e4, 0xa0a2a0, 0x000000, 0x000000,
];

/// Built on first use, then shared by every PPU in the process
pub static SYSTEM_PALETTE: Lazy<ColorTable> = Lazy::new(|| {
    NES_PALETTE_RGB.map(|rgb| {
        let [_, r, g, b] = rgb.to_be_bytes();
        (r, g, b)
    })
});
