use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MapError;
use crate::tile::TILE_SIZE;

/// How a tileset descriptor is classified as uniform or dynamic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TilesetDispatch {
    /// Look at the descriptor itself: `image` means uniform, `tiles` means dynamic.
    #[default]
    Probe,
    /// Legacy dispatch: a descriptor path containing the marker is dynamic.
    PathMarker(String),
}

/// Where assets live and how they are interpreted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Root that image paths inside tileset descriptors are joined onto.
    pub assets_root: PathBuf,
    /// Directory that `tilesets[].source` entries of a map are relative to.
    pub maps_dir: PathBuf,
    /// Edge length of a square tile in pixels.
    pub tile_size: u32,
    /// Uniform/dynamic classification strategy.
    pub dispatch: TilesetDispatch,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            assets_root: PathBuf::from("assets"),
            maps_dir: PathBuf::from("assets/maps"),
            tile_size: TILE_SIZE,
            dispatch: TilesetDispatch::Probe,
        }
    }
}

impl AssetConfig {
    /// Read a config from a JSON file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p).map_err(|source| MapError::Io {
            path: p.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&txt).map_err(|source| MapError::Json {
            path: p.to_path_buf(),
            source,
        })
    }

    /// Replace the assets root.
    pub fn with_assets_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.assets_root = root.into();
        self
    }

    /// Replace the maps directory.
    pub fn with_maps_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.maps_dir = dir.into();
        self
    }

    /// Replace the tile size.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Replace the dispatch strategy.
    pub fn with_dispatch(mut self, dispatch: TilesetDispatch) -> Self {
        self.dispatch = dispatch;
        self
    }
}
