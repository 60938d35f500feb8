//! # Ground Columns
//!
//! Every column holds `depth_rows` square blocks stacked downward from the
//! surface. The top `collision_rows` blocks go to the colliding ground layer;
//! the rest are drawn in a layer nothing collides with.

use verdant_shared::{Layer, Vec2};

use crate::chunk::ChunkCoord;
use crate::config::{LayerConfig, TerrainConfig};
use crate::generator::{ColumnGenerator, ColumnPlacer};
use crate::height::HeightField;
use crate::registry::Placed;
use crate::sink::{Element, ElementKind, Sink};

/// Range generator for ground.
pub type Ground = ColumnGenerator<GroundPlacer>;

/// Places one full ground column.
#[derive(Clone, Debug)]
pub struct GroundPlacer {
    height: HeightField,
    block_size: f32,
    depth_rows: u32,
    collision_rows: u32,
    layer: Layer,
    deep_layer: Layer,
}

impl GroundPlacer {
    /// Creates a placer from terrain and layer settings.
    #[must_use]
    pub fn new(height: HeightField, terrain: &TerrainConfig, layers: &LayerConfig) -> Self {
        Self {
            height,
            block_size: terrain.block_size,
            depth_rows: terrain.depth_rows,
            collision_rows: terrain.collision_rows,
            layer: layers.ground,
            deep_layer: layers.deep_ground,
        }
    }

    /// Layer for block `row` (0 = surface).
    #[inline]
    #[must_use]
    pub const fn layer_for_row(&self, row: u32) -> Layer {
        if row < self.collision_rows {
            self.layer
        } else {
            self.deep_layer
        }
    }
}

impl ColumnPlacer for GroundPlacer {
    const NAME: &'static str = "ground";

    fn place(&self, _coord: ChunkCoord, world_x: f64, sink: &mut dyn Sink) -> Vec<Placed> {
        let surface = self.height.height_at(world_x) as f32;
        let x = world_x as f32;
        let size = Vec2::splat(self.block_size);

        (0..self.depth_rows)
            .map(|row| {
                let kind = if row == 0 { ElementKind::GroundSurface } else { ElementKind::Ground };
                let position = Vec2::new(x, surface + row as f32 * self.block_size);
                let layer = self.layer_for_row(row);
                Placed { id: sink.insert(Element::new(kind, position, size), layer), layer }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkGrid;
    use crate::generator::RangeGenerator;
    use crate::seed::WorldSeed;
    use crate::sink::LayerCollection;

    fn ground() -> (Ground, HeightField) {
        let terrain = TerrainConfig::default();
        let height = HeightField::new(WorldSeed::new(0), 700.0, terrain.block_size, terrain.depth_rows);
        let placer = GroundPlacer::new(height, &terrain, &LayerConfig::default());
        (Ground::new(ChunkGrid::new(30), placer), height)
    }

    #[test]
    fn test_every_column_is_full_depth() {
        let (mut ground, _) = ground();
        let mut sink = LayerCollection::new();

        let report = ground.create_in_range(0.0, 300.0, &mut sink);
        assert_eq!(report.columns, 10);
        assert_eq!(report.elements, 200);
        assert_eq!(sink.count_in_layer(Layer::GROUND), 80);
        assert_eq!(sink.count_in_layer(Layer::DEEP_GROUND), 120);
    }

    #[test]
    fn test_column_stacks_down_from_surface() {
        let (mut ground, height) = ground();
        let mut sink = LayerCollection::new();
        ground.create_in_range(90.0, 120.0, &mut sink);

        let surface = height.height_at(90.0) as f32;
        let mut blocks: Vec<_> = sink.iter().map(|(_, e, l)| (*e, l)).collect();
        blocks.sort_by(|a, b| a.0.position.y.total_cmp(&b.0.position.y));

        assert_eq!(blocks.len(), 20);
        assert_eq!(blocks[0].0.kind, ElementKind::GroundSurface);
        assert!((blocks[0].0.position.y - surface).abs() < 1e-3);
        for (row, (block, layer)) in blocks.iter().enumerate() {
            assert!((block.position.x - 90.0).abs() < f32::EPSILON);
            let expected_y = surface + row as f32 * 30.0;
            assert!((block.position.y - expected_y).abs() < 1e-3, "row {row} misplaced");
            if row > 0 {
                assert_eq!(block.kind, ElementKind::Ground);
            }
            let expected_layer = if row < 8 { Layer::GROUND } else { Layer::DEEP_GROUND };
            assert_eq!(*layer, expected_layer);
        }
    }

    #[test]
    fn test_ground_reaches_viewport_bottom() {
        let (mut ground, _) = ground();
        let mut sink = LayerCollection::new();
        ground.create_in_range(-3000.0, 3000.0, &mut sink);

        // Deepest block of every column ends at or below the viewport edge
        let mut deepest = std::collections::HashMap::new();
        for (_, element, _) in sink.iter() {
            let bottom = element.position.y + element.size.y;
            let entry = deepest.entry(element.position.x.to_bits()).or_insert(f32::MIN);
            *entry = entry.max(bottom);
        }
        for bottom in deepest.values() {
            assert!(*bottom >= 700.0 - 1e-3, "column ends at {bottom}");
        }
    }

    #[test]
    fn test_zero_collision_rows_sends_everything_deep() {
        let terrain = TerrainConfig { collision_rows: 0, ..TerrainConfig::default() };
        let height = HeightField::new(WorldSeed::new(3), 700.0, 30.0, terrain.depth_rows);
        let placer = GroundPlacer::new(height, &terrain, &LayerConfig::default());
        assert_eq!(placer.layer_for_row(0), Layer::DEEP_GROUND);
    }
}
