//! # Infinite Walk Integration Test
//!
//! Proves the viewpoint can walk forever: ground is always under it and the
//! number of live elements never grows with distance.

use std::time::Instant;

use verdant_shared::Vec2;
use verdant_world::{ChunkGrid, LayerCollection, RangeGenerator, World, WorldConfig, WorldSeed};

fn world(seed: u64) -> World {
    let config = WorldConfig { seed: WorldSeed::new(seed), ..WorldConfig::default() };
    World::new(config).unwrap()
}

fn ground_under(world: &World, x: f32) -> bool {
    let grid = ChunkGrid::new(world.config().streaming.chunk_width);
    let column = grid.snap_up(f64::from(x));
    world.coordinator().generators()[0].live_columns().contains(&column)
}

/// Test: Walk 10,000 steps right without leaving the ground.
#[test]
fn test_infinite_walk_10000_steps() {
    let mut world = world(42);
    let mut sink = LayerCollection::new();
    world.materialize(&mut sink);

    let start = Instant::now();
    let mut x = world.config().streaming.spawn_x;
    world.tick(Vec2::new(x, 0.0), &mut sink);
    let baseline_columns = world.coordinator().generators()[0].live_columns().len();

    for step in 0..10_000 {
        x += 7.0;
        world.tick(Vec2::new(x, 0.0), &mut sink);

        if step % 100 == 0 {
            assert!(ground_under(&world, x), "VOID DETECTED at x={x}");
            let columns = world.coordinator().generators()[0].live_columns().len();
            assert!(
                columns.abs_diff(baseline_columns) <= 1,
                "band drifted from {baseline_columns} to {columns} columns"
            );
        }
    }

    let elapsed = start.elapsed();
    println!("Walked 70,000 px in {elapsed:?}");
    println!("Live elements: {}", sink.len());
    println!("Inserted total: {}", sink.inserted_total());
    println!("Removed total: {}", sink.removed_total());

    assert!(ground_under(&world, x), "Final position has no ground!");
    assert_eq!(sink.len(), world.coordinator().live_elements());
    assert!(sink.stray_removals().is_empty());
}

/// Test: Pace back and forth with uneven steps; nothing leaks.
#[test]
fn test_pacing_walk_does_not_leak() {
    let mut world = world(7);
    let mut sink = LayerCollection::new();
    world.materialize(&mut sink);

    let mut x = 0.0f32;
    world.tick(Vec2::new(x, 0.0), &mut sink);

    for leg in 0..40 {
        let direction = if leg % 2 == 0 { 1.0 } else { -1.0 };
        let step = 3.0 + (leg % 5) as f32 * 11.0;
        for _ in 0..50 {
            x += direction * step;
            world.tick(Vec2::new(x, 0.0), &mut sink);
        }
        assert!(ground_under(&world, x), "VOID at leg {leg} x={x}");
    }

    let stats = *world.coordinator().stats();
    println!("Stats: {stats:?}");
    assert_eq!(sink.len() as u64, stats.elements_live());
    assert_eq!(sink.len(), world.coordinator().live_elements());
    assert!(sink.stray_removals().is_empty());

    world.reset(&mut sink);
    assert!(sink.is_empty(), "{} elements leaked after reset", sink.len());
}

/// Test: A teleport wider than the band replaces it wholesale.
#[test]
fn test_teleport_replaces_band() {
    let mut world = world(99_999);
    let mut sink = LayerCollection::new();
    world.materialize(&mut sink);
    world.tick(Vec2::new(500.0, 0.0), &mut sink);

    let far = 500.0 + 50_000.0;
    world.tick(Vec2::new(far, 0.0), &mut sink);

    let band = world.band();
    assert!(band.contains(f64::from(far)));
    assert!(ground_under(&world, far));

    let grid = ChunkGrid::new(30);
    let expected = grid.span(band.left, band.right);
    for generator in world.coordinator().generators() {
        for column in generator.live_columns() {
            assert!(expected.contains(column), "{} kept stale column {column:?}", generator.name());
        }
    }
    assert_eq!(sink.len(), world.coordinator().live_elements());
}
