use macroquad::logging::{debug, info};
use macroquad::prelude::*;
use std::fmt;
use std::path::Path;

use crate::config::AssetConfig;
use crate::error::MapError;
use crate::ir_map::IrTileset;
use crate::loader::json_loader::decode_tileset_file;
use crate::map::TileSetRef;
use crate::path::{join_clean, normalize_asset_path};
use crate::tile::TileId;

/// Where a tile's pixels live: an image slot of the tileset and a source rectangle in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRegion {
    /// Index into [`TileSet::images`].
    pub image: usize,
    pub source: Rect,
}

/// Read and decode an image on the CPU side; no graphics context is needed.
pub fn load_image(path: &Path) -> Result<Image, MapError> {
    debug!("Loading image {}", path.display());
    let bytes = std::fs::read(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Image::from_file_with_format(&bytes, None).map_err(|source| MapError::Image {
        path: path.to_path_buf(),
        source,
    })
}

fn local_index(gid: TileId, first_gid: u32, tile_count: u32) -> Result<u32, MapError> {
    let clean = gid.clean();
    match clean.checked_sub(first_gid) {
        Some(local) if local < tile_count => Ok(local),
        _ => Err(MapError::TileOutOfRange {
            gid: clean,
            first_gid,
            tile_count,
        }),
    }
}

/// One sheet sliced into a grid of square cells.
#[derive(Clone)]
pub struct UniformTileSet {
    first_gid: u32,
    image: Image,
    tile_size: u32,
    columns: u32,
    rows: u32,
}

impl UniformTileSet {
    /// The grid is derived from the image size; partial cells at the edges are ignored.
    pub fn new(first_gid: u32, image: Image, tile_size: u32) -> Self {
        let (columns, rows) = if tile_size == 0 {
            (0, 0)
        } else {
            (
                image.width() as u32 / tile_size,
                image.height() as u32 / tile_size,
            )
        };
        UniformTileSet {
            first_gid,
            image,
            tile_size,
            columns,
            rows,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn lookup(&self, gid: TileId) -> Result<TileRegion, MapError> {
        let local = local_index(gid, self.first_gid, self.tile_count())?;
        let col = local % self.columns;
        let row = local / self.columns;
        let ts = self.tile_size as f32;
        Ok(TileRegion {
            image: 0,
            source: Rect::new(col as f32 * ts, row as f32 * ts, ts, ts),
        })
    }
}

/// One image per tile, indexed by descriptor position.
#[derive(Clone)]
pub struct DynamicTileSet {
    first_gid: u32,
    images: Vec<Image>,
}

impl DynamicTileSet {
    pub fn new(first_gid: u32, images: Vec<Image>) -> Self {
        DynamicTileSet { first_gid, images }
    }

    pub fn tile_count(&self) -> u32 {
        self.images.len() as u32
    }

    pub fn lookup(&self, gid: TileId) -> Result<TileRegion, MapError> {
        let local = local_index(gid, self.first_gid, self.tile_count())? as usize;
        let img = &self.images[local];
        Ok(TileRegion {
            image: local,
            source: Rect::new(0.0, 0.0, img.width() as f32, img.height() as f32),
        })
    }
}

impl fmt::Debug for UniformTileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniformTileSet")
            .field("first_gid", &self.first_gid)
            .field("image", &(self.image.width(), self.image.height()))
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .finish()
    }
}

impl fmt::Debug for DynamicTileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicTileSet")
            .field("first_gid", &self.first_gid)
            .field("images", &self.images.len())
            .finish()
    }
}

/// A tileset of either kind. Lookups are read-only.
#[derive(Debug, Clone)]
pub enum TileSet {
    Uniform(UniformTileSet),
    Dynamic(DynamicTileSet),
}

impl TileSet {
    /// Build the tileset a map entry points at, resolving it under `config.maps_dir`.
    pub fn build(tileset: &TileSetRef, config: &AssetConfig) -> Result<Self, MapError> {
        let path = join_clean(&config.maps_dir, &tileset.source);
        Self::from_descriptor_path(&path, tileset.first_gid, config)
    }

    /// Read a descriptor and load every image it names. Any failure aborts the build.
    pub fn from_descriptor_path(
        path: &Path,
        first_gid: u32,
        config: &AssetConfig,
    ) -> Result<Self, MapError> {
        let ir = decode_tileset_file(path, &config.dispatch)?;
        let ts = Self::from_ir(ir, first_gid, config)?;
        info!(
            "Built {} tileset {} (firstgid {}, {} tiles)",
            if ts.is_uniform() { "uniform" } else { "dynamic" },
            path.display(),
            first_gid,
            ts.tile_count()
        );
        Ok(ts)
    }

    pub fn from_ir(ir: IrTileset, first_gid: u32, config: &AssetConfig) -> Result<Self, MapError> {
        match ir {
            IrTileset::Atlas { image } => {
                let img = load_image(&normalize_asset_path(&config.assets_root, &image))?;
                Ok(TileSet::Uniform(UniformTileSet::new(
                    first_gid,
                    img,
                    config.tile_size,
                )))
            }
            IrTileset::ImagePerTile { tiles } => {
                let images = tiles
                    .iter()
                    .map(|t| load_image(&normalize_asset_path(&config.assets_root, &t.image)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TileSet::Dynamic(DynamicTileSet::new(first_gid, images)))
            }
        }
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, TileSet::Uniform(_))
    }

    pub fn first_gid(&self) -> u32 {
        match self {
            TileSet::Uniform(u) => u.first_gid,
            TileSet::Dynamic(d) => d.first_gid,
        }
    }

    pub fn tile_count(&self) -> u32 {
        match self {
            TileSet::Uniform(u) => u.tile_count(),
            TileSet::Dynamic(d) => d.tile_count(),
        }
    }

    /// Whether `gid` falls inside this tileset's id range.
    pub fn contains(&self, gid: TileId) -> bool {
        local_index(gid, self.first_gid(), self.tile_count()).is_ok()
    }

    /// Map a global id to its image slot and source rectangle.
    pub fn lookup(&self, gid: TileId) -> Result<TileRegion, MapError> {
        match self {
            TileSet::Uniform(u) => u.lookup(gid),
            TileSet::Dynamic(d) => d.lookup(gid),
        }
    }

    pub fn images(&self) -> &[Image] {
        match self {
            TileSet::Uniform(u) => std::slice::from_ref(&u.image),
            TileSet::Dynamic(d) => &d.images,
        }
    }

    pub fn image(&self, slot: usize) -> Option<&Image> {
        self.images().get(slot)
    }
}
