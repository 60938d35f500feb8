//! # Vegetation
//!
//! A column grows a tree when its first draw falls below
//! `tree_probability`. A tree is a trunk rooted on the surface plus a grid of
//! leaves centered on the trunk top; each foliage cell draws once more
//! against `leaf_probability`.
//!
//! Draws come from the column's own stream, so a tree that scrolls away and
//! back regrows leaf for leaf.

use rand::Rng;
use verdant_shared::{Layer, Vec2};

use crate::chunk::ChunkCoord;
use crate::config::{LayerConfig, TerrainConfig, VegetationConfig};
use crate::generator::{ColumnGenerator, ColumnPlacer};
use crate::height::HeightField;
use crate::registry::Placed;
use crate::seed::WorldSeed;
use crate::sink::{Element, ElementKind, Sink};

/// Range generator for trees.
pub type Vegetation = ColumnGenerator<TreePlacer>;

/// Decides and places at most one tree per column.
#[derive(Clone, Debug)]
pub struct TreePlacer {
    height: HeightField,
    seed: WorldSeed,
    settings: VegetationConfig,
    trunk_width: f32,
    trunk_layer: Layer,
    leaf_layer: Layer,
}

impl TreePlacer {
    /// Creates a placer. Trunks are one ground block wide.
    #[must_use]
    pub fn new(
        height: HeightField,
        settings: &VegetationConfig,
        terrain: &TerrainConfig,
        layers: &LayerConfig,
    ) -> Self {
        Self {
            height,
            seed: height.seed(),
            settings: settings.clone(),
            trunk_width: terrain.block_size,
            trunk_layer: layers.trunk,
            leaf_layer: layers.leaf,
        }
    }

    /// Top-left corner of the foliage grid for a trunk top at `(x, top)`.
    fn foliage_origin(&self, x: f32, top: f32) -> Vec2 {
        let leaf = self.settings.leaf_size;
        let left = (self.settings.foliage_cols / 2) as f32 * leaf;
        let up = (self.settings.foliage_rows / 2) as f32 * leaf;
        Vec2::new(x - left, top - up)
    }
}

impl ColumnPlacer for TreePlacer {
    const NAME: &'static str = "vegetation";

    fn place(&self, coord: ChunkCoord, world_x: f64, sink: &mut dyn Sink) -> Vec<Placed> {
        let mut rng = self.seed.column_rng(WorldSeed::VEGETATION, coord.index());
        if rng.gen::<f64>() >= self.settings.tree_probability {
            return Vec::new();
        }

        let x = world_x as f32;
        let trunk_height = self.settings.trunk_height;
        let top = self.height.height_at(world_x) as f32 - trunk_height;

        let trunk = Element::new(
            ElementKind::Trunk,
            Vec2::new(x, top),
            Vec2::new(self.trunk_width, trunk_height),
        );
        let mut placed = vec![Placed { id: sink.insert(trunk, self.trunk_layer), layer: self.trunk_layer }];

        let leaf = self.settings.leaf_size;
        let origin = self.foliage_origin(x, top);
        for col in 0..self.settings.foliage_cols {
            for row in 0..self.settings.foliage_rows {
                if rng.gen::<f64>() >= self.settings.leaf_probability {
                    continue;
                }
                let position = origin + Vec2::new(col as f32 * leaf, row as f32 * leaf);
                let element = Element::new(ElementKind::Leaf, position, Vec2::splat(leaf));
                placed.push(Placed { id: sink.insert(element, self.leaf_layer), layer: self.leaf_layer });
            }
        }
        placed
    }
}
