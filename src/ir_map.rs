// src/ir_map.rs

/// Decoded tileset descriptor, before any image is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrTileset {
    /// One image atlas sliced into a regular grid.
    Atlas {
        image: String, // relative to the descriptor, see normalize_asset_path
    },
    /// One image per tile, in descriptor order.
    ImagePerTile { tiles: Vec<IrTileImage> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrTileImage {
    pub id: u32,
    pub image: String,
    pub width: u32, // informational only
    pub height: u32,
}
