mod bg_tile;
mod frame;
pub mod palette;

use crate::ppu::registers::SpriteData;
use crate::ppu::Ppu;
use crate::render::bg_tile::BgTile;
use crate::utils::MirroredAddress;
use crate::Byte;

pub use frame::Frame;

pub type Rgb = (Byte, Byte, Byte);

const SPRITE_PALETTES_START: usize = 4;

/// Composites the background and all 64 sprites into `frame`, as color indices
pub fn render(ppu: &Ppu, frame: &mut Frame) {
    render_background(ppu, frame);
    render_sprites(ppu, frame);
}

fn render_background(ppu: &Ppu, frame: &mut Frame) {
    let control = ppu.registers.control;
    let scroll = ppu.registers.scroll;
    let bank = control.background_pattern_address() as usize;
    let scroll_x = scroll.scroll_x as usize + control.nametable_x_offset();

    for y in 0..Frame::HEIGHT {
        let world_y = y + scroll.scroll_y as usize;
        let fine_y = world_y % 8;

        for x in 0..Frame::WIDTH {
            let world_x = x + scroll_x;
            let fine_x = world_x % 8;
            let tile = BgTile::at(world_x, world_y);

            let tile_idx = ppu.vram[tile.nametable_addr().mirror_nametable_addr() as usize];
            let row_addr = bank + tile_idx as usize * 16 + fine_y;
            let value = pattern_pixel(&ppu.chr, row_addr, 7 - fine_x);

            let color = match value {
                0 => ppu.palette_table[0],
                _ => {
                    let attr_byte =
                        ppu.vram[tile.attribute_addr().mirror_nametable_addr() as usize];
                    let palette = tile.palette_index(attr_byte) as usize;

                    ppu.palette_table[palette * 4 + value as usize]
                }
            };

            frame.set_pixel(x, y, color & 0x3f);
        }
    }
}

fn render_sprites(ppu: &Ppu, frame: &mut Frame) {
    let control = ppu.registers.control;
    let height = control.sprite_height();
    let bank = control.sprite_pattern_address() as usize;

    // back to front: lower OAM entries end up on top
    for sprite in ppu.registers.sprites().rev() {
        let palette = SPRITE_PALETTES_START + sprite.palette_index() as usize;

        for row in 0..height {
            // sprites are drawn one scanline below their OAM y
            let draw_y = sprite.y as usize + 1 + row;
            if draw_y >= Frame::HEIGHT {
                continue;
            }

            let tile_row = if sprite.flip_vertically() {
                height - 1 - row
            } else {
                row
            };
            let row_addr = sprite_row_address(&sprite, tile_row, height, bank);

            for col in 0..8 {
                let draw_x = sprite.x as usize + col;
                if draw_x >= Frame::WIDTH {
                    continue;
                }

                let bit = if sprite.flip_horizontally() { col } else { 7 - col };
                let value = pattern_pixel(&ppu.chr, row_addr, bit);
                if value == 0 {
                    continue;
                }

                let color = ppu.palette_table[palette * 4 + value as usize];
                frame.set_pixel(draw_x, draw_y, color & 0x3f);
            }
        }
    }
}

/// CHR address of one pixel row of a sprite.
/// 8x16 sprites take their pattern table from bit 0 of the tile index and
/// span two consecutive tiles.
fn sprite_row_address(sprite: &SpriteData, tile_row: usize, height: usize, bank: usize) -> usize {
    let tile_idx = sprite.index_number as usize;

    if height == 16 {
        let table = (tile_idx & 1) * 0x1000;
        let top_tile = tile_idx & 0xfe;
        let (tile, row) = if tile_row >= 8 {
            (top_tile + 1, tile_row - 8)
        } else {
            (top_tile, tile_row)
        };

        table + tile * 16 + row
    } else {
        bank + tile_idx * 16 + tile_row
    }
}

/// 2-bit color of a pixel, built from the two bit planes 8 bytes apart
fn pattern_pixel(chr: &[Byte], row_addr: usize, bit: usize) -> Byte {
    let lo = chr.get(row_addr).copied().unwrap_or_default() >> bit & 1;
    let hi = chr.get(row_addr + 8).copied().unwrap_or_default() >> bit & 1;

    hi << 1 | lo
}
