use crate::{Address, Byte};

const TILES_PER_ROW: usize = 32;
const TILE_ROWS: usize = 30;
const NAMETABLE_SIZE: usize = 0x400;
const ATTRIBUTE_TABLE_OFFSET: usize = 0x3c0;

/// Background tile under a point of the two-nametable (512x240) world
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BgTile {
    /// 0 for the left nametable, 1 for the right one
    pub table: usize,
    pub column: usize,
    pub row: usize,
}

impl BgTile {
    pub fn at(world_x: usize, world_y: usize) -> Self {
        let name_x = (world_x / 8) % (2 * TILES_PER_ROW);

        Self {
            table: name_x / TILES_PER_ROW,
            column: name_x % TILES_PER_ROW,
            row: (world_y / 8) % TILE_ROWS,
        }
    }

    /// Offset of the tile index in nametable space (before mirroring)
    pub fn nametable_addr(&self) -> Address {
        (self.table * NAMETABLE_SIZE + self.row * TILES_PER_ROW + self.column) as Address
    }

    /// Offset of the attribute byte covering this tile's 4x4 block
    pub fn attribute_addr(&self) -> Address {
        (self.table * NAMETABLE_SIZE + ATTRIBUTE_TABLE_OFFSET + self.row / 4 * 8 + self.column / 4)
            as Address
    }

    /// Picks this tile's 2-bit palette number out of its attribute byte
    pub fn palette_index(&self, attribute_byte: Byte) -> Byte {
        let shift = (self.row & 2) * 2 + (self.column & 2);

        (attribute_byte >> shift) & 0b11
    }
}
