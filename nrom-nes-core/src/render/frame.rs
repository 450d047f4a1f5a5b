use crate::render::palette::ColorTable;
use crate::Byte;

/// 256x240 screen of 6-bit NES color indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub pixel_data: Vec<Byte>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            pixel_data: vec![0; Self::WIDTH * Self::HEIGHT],
        }
    }
}

impl Frame {
    pub const WIDTH: usize = 256;
    pub const HEIGHT: usize = 240;

    pub fn set_pixel(&mut self, x: usize, y: usize, color_index: Byte) {
        if x < Self::WIDTH && y < Self::HEIGHT {
            self.pixel_data[y * Self::WIDTH + x] = color_index;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Byte {
        self.pixel_data
            .get(y * Self::WIDTH + x)
            .copied()
            .unwrap_or_default()
    }

    /// Packed RGB24 rows, ready for a texture or an image encoder
    pub fn to_rgb(&self, colors: &ColorTable) -> Vec<Byte> {
        self.pixel_data
            .iter()
            .flat_map(|&index| {
                let (r, g, b) = colors[(index & 0x3f) as usize];
                [r, g, b]
            })
            .collect()
    }
}
