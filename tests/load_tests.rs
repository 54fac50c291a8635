// tests/load_tests.rs

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use macroquad_tile_rpg::{ErrorKind, MapDocument, MapError};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("mq_tile_rpg_load_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

const SPAWN_MAP: &str = r#"
{
    "tilewidth": 16,
    "tileheight": 16,
    "dummyField": "ignored",
    "layers": [
        { "id": 2, "name": "Object", "width": 3, "height": 2, "data": [0, 0, 23, 0, 0, 0], "opacity": 1 },
        { "id": 1, "name": "Floor", "width": 3, "height": 2, "data": [1, 2, 3, 4, 5, 6] }
    ],
    "tilesets": [
        { "firstgid": 1, "source": "../tilesets/floor.json" },
        { "firstgid": 23, "source": "../tilesets/buildings/buildings.json" }
    ]
}
"#;

#[test]
fn load_from_file_sorts_layers() {
    let path = temp_dir().join("spawn-map.json");
    fs::write(&path, SPAWN_MAP).unwrap();

    let map = MapDocument::load(&path).expect("should load map from file");
    let ids: Vec<u32> = map.layers().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(map.layers()[0].name, "Floor");
    assert_eq!(map.tilesets().len(), 2);
    assert_eq!(map.tilesets()[1].source, "../tilesets/buildings/buildings.json");
}

#[test]
fn every_load_rereads_the_file() {
    let path = temp_dir().join("map.json");
    fs::write(&path, SPAWN_MAP).unwrap();
    let first = MapDocument::load(&path).unwrap();

    fs::write(&path, r#"{ "layers": [], "tilesets": [] }"#).unwrap();
    let second = MapDocument::load(&path).unwrap();

    assert_eq!(first.layers().len(), 2);
    assert!(second.layers().is_empty());
}

#[test]
fn missing_file_is_a_file_error_with_path() {
    let path = temp_dir().join("nonexistent.json");
    let err = MapDocument::load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::File);
    assert!(matches!(err, MapError::Io { path: ref p, .. } if *p == path));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let path = temp_dir().join("broken.json");
    fs::write(&path, "{ \"layers\": [ ").unwrap();
    let err = MapDocument::load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(matches!(err, MapError::Json { .. }));
}

#[test]
fn wrong_field_type_is_a_parse_error() {
    let json = r#"{ "layers": [ { "id": "one", "name": "L", "width": 1, "height": 1, "data": [0] } ], "tilesets": [] }"#;
    let err = MapDocument::from_json_str(json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn load_allows_empty_layer_name() {
    let json = r#"{ "layers": [ { "id": 1, "width": 1, "height": 1, "data": [1] } ], "tilesets": [] }"#;
    let map = MapDocument::from_json_str(json).unwrap();
    assert_eq!(map.layers()[0].name, "");
}
