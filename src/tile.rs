use macroquad::prelude::*;

/// Edge length of a map tile in pixels.
pub const TILE_SIZE: u32 = 16;

// Tiled stores flip flags in bits 31..29 of a gid.
const GID_MASK: u32 = 0x1FFF_FFFF;

/// Global tile id as stored in layer data. `0` means "no tile".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    /// The id with flip flags masked off.
    #[inline]
    pub fn clean(self) -> u32 {
        self.0 & GID_MASK
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.clean() == 0
    }
}

/// Column and row of the flat, row-major `index` in a layer `width` tiles wide.
#[inline]
pub fn grid_position(index: usize, width: usize) -> (usize, usize) {
    (index % width, index / width)
}

/// Top-left pixel of the flat `index`.
#[inline]
pub fn pixel_position(index: usize, width: usize, tile_size: u32) -> Vec2 {
    let (col, row) = grid_position(index, width);
    vec2(col as f32 * tile_size as f32, row as f32 * tile_size as f32)
}
