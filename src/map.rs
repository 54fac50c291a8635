use macroquad::logging::info;
use macroquad::prelude::*;
use std::path::Path;

use crate::config::AssetConfig;
use crate::error::MapError;
use crate::loader::json_loader::{decode_map_file, decode_map_str};
use crate::tile::{grid_position, TileId};
use crate::tileset::TileSet;

/// Layer id as written in the map file.
pub type LayerId = u32;

/// One grid of tile ids forming one draw pass of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Raw global ids, row-major, `width * height` long.
    pub data: Vec<u32>,
}

impl Layer {
    pub fn new(id: LayerId, name: String, width: usize, height: usize, data: Vec<u32>) -> Self {
        Layer {
            id,
            name,
            width,
            height,
            data,
        }
    }

    /// Non-empty tiles as `(flat index, id, (column, row))`.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, TileId, (usize, usize))> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(idx, &gid)| (idx, TileId(gid)))
            .filter(|(_, id)| !id.is_empty())
            .map(move |(idx, id)| (idx, id, grid_position(idx, self.width)))
    }
}

/// Reference from a map to an external tileset descriptor.
///
/// The loader builds one per `tilesets[]` entry; [`MapDocument::build_tilesets`] resolves
/// `source` against the maps directory and loads the descriptor it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSetRef {
    /// Smallest global id the tileset supplies.
    pub first_gid: u32,
    /// Descriptor path, relative to the maps directory.
    pub source: String,
}

/// Parsed map file: layers sorted by id plus the tileset table.
#[derive(Debug, Clone)]
pub struct MapDocument {
    layers: Vec<Layer>,
    tilesets: Vec<TileSetRef>,
    tile_w: u32,
    tile_h: u32,
}

impl MapDocument {
    /// Read and decode a map file. Every call re-reads the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let doc = decode_map_file(path.as_ref())?;
        info!(
            "Loaded map {} ({} layers, {} tilesets)",
            path.as_ref().display(),
            doc.layers.len(),
            doc.tilesets.len()
        );
        Ok(doc)
    }

    /// Decode a map from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        decode_map_str(json, Path::new("<inline>"))
    }

    /// Assemble a map in code, e.g. for tests or generated levels.
    ///
    /// Layers are stably sorted by id; file order does not matter. Layer data is taken
    /// as given, so callers are responsible for `data.len() == width * height`.
    pub fn from_parts(
        mut layers: Vec<Layer>,
        tilesets: Vec<TileSetRef>,
        tile_w: u32,
        tile_h: u32,
    ) -> Self {
        layers.sort_by_key(|l| l.id);
        MapDocument {
            layers,
            tilesets,
            tile_w,
            tile_h,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn tilesets(&self) -> &[TileSetRef] {
        &self.tilesets
    }

    /// `tilewidth` from the file; rendering uses the configured tile size instead.
    pub fn tile_width(&self) -> u32 {
        self.tile_w
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_h
    }

    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Pixel extent of the map, taken from the first layer.
    pub fn pixel_size(&self, tile_size: u32) -> Vec2 {
        match self.layers.first() {
            Some(l) => vec2(
                l.width as f32 * tile_size as f32,
                l.height as f32 * tile_size as f32,
            ),
            None => Vec2::ZERO,
        }
    }

    /// Build every referenced tileset, in file order. The first failure aborts.
    pub fn build_tilesets(&self, config: &AssetConfig) -> Result<Vec<TileSet>, MapError> {
        self.tilesets
            .iter()
            .map(|r| TileSet::build(r, config))
            .collect()
    }
}
