use macroquad::prelude::{Rect, Vec2};

/// One tile to blit: which image of which tileset, the source rect in it, and where it goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Position in the map's sorted layer list.
    pub layer_index: usize,
    pub tileset_index: usize,
    /// Image slot inside the tileset.
    pub image: usize,
    pub src: Rect,
    /// Top-left pixel of the tile's grid cell.
    pub dest: Vec2,
}
