//! # Config File Tests
//!
//! Loading worlds from TOML on disk.

use std::io::Write;

use verdant_world::{ConfigError, LayerCollection, RangeGenerator, World, WorldConfig, WorldSeed};

/// Test: The shipped config parses and equals the defaults.
#[test]
fn test_shipped_config_is_stock() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/world.toml");
    let config = WorldConfig::from_file(path).unwrap();
    assert_eq!(config, WorldConfig::default());
}

/// Test: A world builds from a file and honors its values.
#[test]
fn test_world_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
seed = 1234

[vegetation]
tree_probability = 0.0

[creatures]
creature_probability = 0.0
"#
    )
    .unwrap();

    let mut world = World::from_file(file.path()).unwrap();
    assert_eq!(world.seed(), WorldSeed::new(1234));

    let mut sink = LayerCollection::new();
    world.materialize(&mut sink);
    let generators = world.coordinator().generators();
    assert!(!generators[0].live_columns().is_empty());
    assert!(generators[1].live_columns().is_empty());
    assert!(generators[2].live_columns().is_empty());
}

/// Test: Bad files surface the right error.
#[test]
fn test_bad_files() {
    let mut garbage = tempfile::NamedTempFile::new().unwrap();
    writeln!(garbage, "seed = = 3").unwrap();
    assert!(matches!(World::from_file(garbage.path()), Err(ConfigError::Parse(_))));

    let mut invalid = tempfile::NamedTempFile::new().unwrap();
    writeln!(invalid, "[terrain]\ndepth_rows = 2\ncollision_rows = 8").unwrap();
    match World::from_file(invalid.path()) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "terrain.collision_rows"),
        other => panic!("expected Invalid, got {other:?}"),
    }

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(World::from_file(&missing), Err(ConfigError::Io { .. })));
}
