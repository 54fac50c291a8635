// src/loader/json_loader.rs
use crate::config::TilesetDispatch;
use crate::error::MapError;
use crate::ir_map::*;
use crate::map::{Layer, MapDocument, TileSetRef};
use crate::tile::TILE_SIZE;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::Path;

#[derive(Deserialize)]
struct JsonLayer {
    id: u32,
    #[serde(default)]
    name: String,
    width: usize,
    height: usize,
    data: Vec<u32>,
}

#[derive(Deserialize)]
struct JsonTilesetRef {
    firstgid: u32,
    source: String,
}

fn default_tile() -> u32 {
    TILE_SIZE
}

#[derive(Deserialize)]
struct JsonMap {
    layers: Vec<JsonLayer>,
    tilesets: Vec<JsonTilesetRef>,
    #[serde(default = "default_tile")]
    tilewidth: u32,
    #[serde(default = "default_tile")]
    tileheight: u32,
}

#[derive(Deserialize)]
struct JsonTile {
    #[serde(default)]
    id: u32,
    image: String,
    #[serde(default)]
    imagewidth: u32,
    #[serde(default)]
    imageheight: u32,
}

/// Both descriptor schemas in one shape; which fields are present decides the kind.
/// `tiles` stays untyped until the descriptor is known to be a tile list, since atlas
/// descriptors may carry per-tile metadata there.
#[derive(Deserialize)]
struct JsonTilesetDescriptor {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    tiles: Option<JsonValue>,
}

fn read_file(path: &Path) -> Result<String, MapError> {
    std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn decode_map_file(path: &Path) -> Result<MapDocument, MapError> {
    let txt = read_file(path)?;
    decode_map_str(&txt, path)
}

/// `path` is only used to label errors.
pub fn decode_map_str(txt: &str, path: &Path) -> Result<MapDocument, MapError> {
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut layers = Vec::with_capacity(j.layers.len());
    for l in j.layers {
        let expected = l.width.checked_mul(l.height);
        if expected != Some(l.data.len()) {
            return Err(MapError::InvalidLayerSize {
                layer: l.name,
                expected: expected.unwrap_or(usize::MAX),
                actual: l.data.len(),
            });
        }
        layers.push(Layer::new(l.id, l.name, l.width, l.height, l.data));
    }

    let mut tilesets = Vec::with_capacity(j.tilesets.len());
    for ts in j.tilesets {
        if ts.firstgid == 0 {
            return Err(MapError::InvalidTileset {
                path: ts.source.into(),
                reason: "firstgid must be at least 1".to_owned(),
            });
        }
        tilesets.push(TileSetRef {
            first_gid: ts.firstgid,
            source: ts.source,
        });
    }

    Ok(MapDocument::from_parts(
        layers,
        tilesets,
        j.tilewidth,
        j.tileheight,
    ))
}

pub fn decode_tileset_file(path: &Path, dispatch: &TilesetDispatch) -> Result<IrTileset, MapError> {
    let txt = read_file(path)?;
    decode_tileset_str(&txt, path, dispatch)
}

pub fn decode_tileset_str(
    txt: &str,
    path: &Path,
    dispatch: &TilesetDispatch,
) -> Result<IrTileset, MapError> {
    let j: JsonTilesetDescriptor = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let want_tiles = match dispatch {
        TilesetDispatch::Probe => j.image.is_none(),
        TilesetDispatch::PathMarker(marker) => path.to_string_lossy().contains(marker.as_str()),
    };

    let invalid = |reason: &str| MapError::InvalidTileset {
        path: path.to_path_buf(),
        reason: reason.to_owned(),
    };

    if want_tiles {
        let raw = j.tiles.ok_or_else(|| invalid("expected an `image` or `tiles` field"))?;
        let tiles: Vec<JsonTile> = serde_json::from_value(raw).map_err(|source| MapError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(IrTileset::ImagePerTile {
            tiles: tiles
                .into_iter()
                .map(|t| IrTileImage {
                    id: t.id,
                    image: t.image,
                    width: t.imagewidth,
                    height: t.imageheight,
                })
                .collect(),
        })
    } else {
        let image = j.image.ok_or_else(|| invalid("missing `image` field"))?;
        Ok(IrTileset::Atlas { image })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> &'static Path {
        Path::new("assets/tilesets/test.json")
    }

    #[test]
    fn returns_typed_error_for_malformed_json() {
        let err = decode_map_str("{ not json", p()).err().expect("expected decode error");
        assert!(matches!(err, MapError::Json { .. }));
    }

    #[test]
    fn returns_typed_error_for_layer_size_mismatch() {
        let json = r#"{
          "layers": [ { "id": 1, "name": "oops", "width": 2, "height": 2, "data": [1,2,3] } ],
          "tilesets": []
        }"#;
        let err = decode_map_str(json, p()).unwrap_err();
        assert!(
            matches!(err, MapError::InvalidLayerSize { ref layer, expected: 4, actual: 3 } if layer == "oops")
        );
    }

    #[test]
    fn oversized_layer_dimensions_are_a_parse_error() {
        let json = r#"{
          "layers": [ { "id": 1, "name": "huge", "width": 18446744073709551615, "height": 2, "data": [0] } ],
          "tilesets": []
        }"#;
        let err = decode_map_str(json, p()).unwrap_err();
        assert!(matches!(err, MapError::InvalidLayerSize { ref layer, actual: 1, .. } if layer == "huge"));
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
    }

    #[test]
    fn rejects_zero_firstgid() {
        let json = r#"{ "layers": [], "tilesets": [ { "firstgid": 0, "source": "a.json" } ] }"#;
        let err = decode_map_str(json, p()).unwrap_err();
        assert!(matches!(err, MapError::InvalidTileset { .. }));
    }

    #[test]
    fn missing_tile_size_defaults() {
        let map = decode_map_str(r#"{ "layers": [], "tilesets": [] }"#, p()).unwrap();
        assert_eq!(map.tile_width(), 16);
        assert_eq!(map.tile_height(), 16);
    }

    #[test]
    fn probe_picks_atlas_when_image_present() {
        let ts = decode_tileset_str(
            r#"{ "image": "../images/floor.png", "tiles": [] }"#,
            p(),
            &TilesetDispatch::Probe,
        )
        .unwrap();
        assert_eq!(
            ts,
            IrTileset::Atlas {
                image: "../images/floor.png".into()
            }
        );
    }

    #[test]
    fn atlas_with_tile_metadata_is_still_an_atlas() {
        let ts = decode_tileset_str(
            r#"{ "image": "images/floor.png", "tiles": [ { "id": 3, "properties": [] } ] }"#,
            p(),
            &TilesetDispatch::Probe,
        )
        .unwrap();
        assert_eq!(
            ts,
            IrTileset::Atlas {
                image: "images/floor.png".into()
            }
        );
    }

    #[test]
    fn tile_list_entry_without_image_is_a_parse_error() {
        let err = decode_tileset_str(
            r#"{ "tiles": [ { "id": 0 } ] }"#,
            p(),
            &TilesetDispatch::Probe,
        )
        .unwrap_err();
        assert!(matches!(err, MapError::Json { .. }));
    }

    #[test]
    fn probe_falls_back_to_tile_list() {
        let ts = decode_tileset_str(
            r#"{ "tiles": [
                { "id": 0, "image": "a.png", "imagewidth": 32, "imageheight": 48 },
                { "id": 1, "image": "b.png" }
            ] }"#,
            p(),
            &TilesetDispatch::Probe,
        )
        .unwrap();
        match ts {
            IrTileset::ImagePerTile { tiles } => {
                assert_eq!(tiles.len(), 2);
                assert_eq!(tiles[0].width, 32);
                assert_eq!(tiles[1].image, "b.png");
            }
            other => panic!("expected tile list, got {:?}", other),
        }
    }

    #[test]
    fn probe_rejects_descriptor_with_neither_schema() {
        let err = decode_tileset_str(r#"{ "name": "x" }"#, p(), &TilesetDispatch::Probe)
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidTileset { .. }));
    }

    #[test]
    fn path_marker_forces_kind() {
        let marker = TilesetDispatch::PathMarker("buildings".into());
        let json = r#"{ "image": "sheet.png", "tiles": [ { "id": 0, "image": "house.png" } ] }"#;

        let dynamic =
            decode_tileset_str(json, Path::new("assets/tilesets/buildings.json"), &marker).unwrap();
        assert!(matches!(dynamic, IrTileset::ImagePerTile { .. }));

        let uniform =
            decode_tileset_str(json, Path::new("assets/tilesets/floor.json"), &marker).unwrap();
        assert!(matches!(uniform, IrTileset::Atlas { .. }));
    }
}
