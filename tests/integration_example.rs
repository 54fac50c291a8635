// tests/integration_example.rs

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use macroquad::prelude::*;
use macroquad_tile_rpg::{plan_draws, AssetConfig, MapDocument, TilesetPairing};

fn temp_assets() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let root = std::env::temp_dir()
        .join(format!("mq_tile_rpg_it_{nanos}"))
        .join("assets");
    for sub in ["maps", "tilesets/buildings", "images/buildings"] {
        fs::create_dir_all(root.join(sub)).expect("failed to create temp dir");
    }
    root
}

#[test]
fn map_to_draw_commands() -> anyhow::Result<()> {
    let root = temp_assets();
    let png = |rel: &str, w, h| {
        Image::gen_image_color(w, h, WHITE).export_png(root.join(rel).to_str().unwrap())
    };
    png("images/floor.png", 64, 16);
    png("images/buildings/house.png", 32, 48);

    fs::write(root.join("tilesets/floor.json"), r#"{ "image": "../images/floor.png" }"#)?;
    fs::write(
        root.join("tilesets/buildings/buildings.json"),
        r#"{ "tiles": [ { "id": 0, "image": "../../images/buildings/house.png" } ] }"#,
    )?;
    fs::write(
        root.join("maps/spawn-map.json"),
        r#"{
            "tilewidth": 16, "tileheight": 16,
            "layers": [
                { "id": 2, "name": "Object", "width": 4, "height": 1, "data": [0, 0, 0, 5] },
                { "id": 1, "name": "Floor", "width": 4, "height": 1, "data": [0, 2, 0, 4] }
            ],
            "tilesets": [
                { "firstgid": 1, "source": "../tilesets/floor.json" },
                { "firstgid": 5, "source": "../tilesets/buildings/buildings.json" }
            ]
        }"#,
    )?;

    let config = AssetConfig::default()
        .with_assets_root(&root)
        .with_maps_dir(root.join("maps"));
    let map = MapDocument::load(root.join("maps/spawn-map.json")).context("loading map")?;
    let tilesets = map.build_tilesets(&config).context("building tilesets")?;

    let plan = plan_draws(&map, &tilesets, &TilesetPairing::positional(&map), config.tile_size);
    assert!(plan.warnings.is_empty());

    let summary: Vec<(usize, usize, Vec2, Rect)> = plan
        .commands
        .iter()
        .map(|c| (c.layer_index, c.tileset_index, c.dest, c.src))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, 0, vec2(16.0, 0.0), Rect::new(16.0, 0.0, 16.0, 16.0)),
            (0, 0, vec2(48.0, 0.0), Rect::new(48.0, 0.0, 16.0, 16.0)),
            (1, 1, vec2(48.0, 0.0), Rect::new(0.0, 0.0, 32.0, 48.0)),
        ]
    );
    Ok(())
}
