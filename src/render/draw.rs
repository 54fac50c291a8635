use macroquad::logging::warn;
use macroquad::prelude::*;
use std::collections::HashMap;
use std::fmt;

use crate::command::DrawCommand;
use crate::map::{LayerId, MapDocument};
use crate::tile::{pixel_position, TileId};
use crate::tileset::TileSet;

/// Which tileset resolves the tiles of a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TilesetPairing {
    /// Fixed `layer id -> tileset index` table.
    Explicit(HashMap<LayerId, usize>),
    /// `table[i]` is the tileset of the i-th layer in sorted order. Layers sharing an id
    /// keep separate entries.
    ByLayerIndex(Vec<usize>),
    /// Each tile goes to the tileset with the largest `first_gid <= gid`.
    ByGid,
}

impl TilesetPairing {
    /// The i-th layer (in sorted order) is drawn with the i-th tileset.
    pub fn positional(map: &MapDocument) -> Self {
        TilesetPairing::ByLayerIndex((0..map.layers().len()).collect())
    }

    pub fn explicit<I: IntoIterator<Item = (LayerId, usize)>>(table: I) -> Self {
        TilesetPairing::Explicit(table.into_iter().collect())
    }

    pub fn by_gid() -> Self {
        TilesetPairing::ByGid
    }

    fn resolve(
        &self,
        layer_index: usize,
        layer: LayerId,
        gid: TileId,
        tilesets: &[TileSet],
    ) -> Option<usize> {
        match self {
            TilesetPairing::Explicit(table) => table.get(&layer).copied(),
            TilesetPairing::ByLayerIndex(table) => table.get(layer_index).copied(),
            TilesetPairing::ByGid => tilesets
                .iter()
                .enumerate()
                .filter(|(_, ts)| ts.first_gid() <= gid.clean())
                .max_by_key(|(_, ts)| ts.first_gid())
                .map(|(i, _)| i),
        }
    }
}

/// A tile that could not be drawn. Rendering carries on without it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsWarning {
    pub layer_id: LayerId,
    /// Flat index of the tile in the layer.
    pub index: usize,
    pub gid: u32,
    pub reason: String,
}

impl fmt::Display for BoundsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skipping tile {} at index {} of layer {}: {}",
            self.gid, self.index, self.layer_id, self.reason
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawPlan {
    pub commands: Vec<DrawCommand>,
    pub warnings: Vec<BoundsWarning>,
}

fn fits(src: Rect, image: &Image) -> bool {
    src.x >= 0.0
        && src.y >= 0.0
        && src.x + src.w <= image.width() as f32
        && src.y + src.h <= image.height() as f32
}

/// Turn every non-empty tile into a draw command, layers in sorted order.
///
/// Lookups that fail or land outside the source image are logged and skipped.
pub fn plan_draws(
    map: &MapDocument,
    tilesets: &[TileSet],
    pairing: &TilesetPairing,
    tile_size: u32,
) -> DrawPlan {
    let mut plan = DrawPlan::default();

    for (layer_index, layer) in map.layers().iter().enumerate() {
        for (idx, id, _) in layer.tiles() {
            let mut skip = |reason: String| {
                let w = BoundsWarning {
                    layer_id: layer.id,
                    index: idx,
                    gid: id.clean(),
                    reason,
                };
                warn!("{}", w);
                plan.warnings.push(w);
            };

            let Some(ts_idx) = pairing.resolve(layer_index, layer.id, id, tilesets) else {
                skip(format!("layer '{}' has no tileset", layer.name));
                continue;
            };
            let Some(ts) = tilesets.get(ts_idx) else {
                skip(format!("tileset index {} does not exist", ts_idx));
                continue;
            };
            let region = match ts.lookup(id) {
                Ok(r) => r,
                Err(e) => {
                    skip(e.to_string());
                    continue;
                }
            };
            match ts.image(region.image) {
                Some(img) if fits(region.source, img) => {}
                _ => {
                    skip(format!("source rect {:?} is outside the image", region.source));
                    continue;
                }
            }

            plan.commands.push(DrawCommand {
                layer_index,
                tileset_index: ts_idx,
                image: region.image,
                src: region.source,
                dest: pixel_position(idx, layer.width, tile_size),
            });
        }
    }

    plan
}
