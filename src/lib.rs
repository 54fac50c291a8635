//! Tile map and tileset loading for a small Macroquad action-RPG.
//!
//! A [`MapDocument`] holds the layered tile grid; [`TileSet`]s resolve global tile
//! ids to image regions; [`plan_draws`] turns both into per-tile [`DrawCommand`]s.

pub mod actor;
pub mod camera;
mod command;
mod config;
mod error;
mod ir_map;
mod loader {
    pub mod json_loader;
}
mod map;
mod path;
mod render {
    pub mod draw;
}
mod tile;
mod tileset;

pub use command::DrawCommand;
pub use config::{AssetConfig, TilesetDispatch};
pub use error::{ErrorKind, MapError};
pub use ir_map::{IrTileImage, IrTileset};
pub use map::{Layer, LayerId, MapDocument, TileSetRef};
pub use path::{clean_path, normalize_asset_path};
pub use render::draw::{plan_draws, BoundsWarning, DrawPlan, TilesetPairing};
pub use tile::{grid_position, pixel_position, TileId, TILE_SIZE};
pub use tileset::{load_image, DynamicTileSet, TileRegion, TileSet, UniformTileSet};
