use crate::utils::NthBit;
use crate::Byte;

pub const OAM_SIZE: usize = 256;
const SPRITE_DATA_SIZE: usize = 4;

/// Internal memory to keep state of sprites (Object Attribute Memory)
#[derive(Debug, Clone)]
pub struct Oam {
    data: [Byte; OAM_SIZE],
    address: Byte,
}

/// One 4-byte OAM entry
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpriteData {
    /// Scanline above the sprite's top row
    pub y: Byte,
    pub index_number: Byte,
    pub attributes: Byte,
    pub x: Byte,
}

impl SpriteData {
    fn from_bytes(bytes: &[Byte]) -> Self {
        match *bytes {
            [y, index_number, attributes, x] => Self {
                y,
                index_number,
                attributes,
                x,
            },
            _ => Self::default(),
        }
    }

    /// Sprite palette number, 0..=3
    #[inline]
    pub fn palette_index(&self) -> Byte {
        self.attributes & 0b11
    }

    #[inline]
    pub fn flip_horizontally(&self) -> bool {
        self.attributes.nth_bit(6)
    }

    #[inline]
    pub fn flip_vertically(&self) -> bool {
        self.attributes.nth_bit(7)
    }
}

impl Default for Oam {
    fn default() -> Self {
        Self {
            data: [0; OAM_SIZE],
            address: 0,
        }
    }
}

impl Oam {
    /// $2004 read: no address increment
    pub fn read(&self) -> Byte {
        self.data[self.address as usize]
    }

    pub fn write(&mut self, value: Byte) {
        self.data[self.address as usize] = value;
        self.address = self.address.wrapping_add(1);
    }

    pub fn write_address(&mut self, address: Byte) {
        self.address = address;
    }

    /// DMA fills the whole table starting at entry 0
    pub fn write_all(&mut self, buffer: &[Byte; OAM_SIZE]) {
        self.data = *buffer;
    }

    pub fn sprites(&self) -> impl DoubleEndedIterator<Item = SpriteData> + '_ {
        self.data
            .chunks_exact(SPRITE_DATA_SIZE)
            .map(SpriteData::from_bytes)
    }
}
