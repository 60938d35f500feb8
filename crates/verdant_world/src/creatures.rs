//! # Creatures
//!
//! At most one creature per column, resting on the surface. Each carries a
//! behaviour seed of `world seed + column x` so its own schedule (jumps,
//! pacing) is as reproducible as its placement.

use rand::Rng;
use verdant_shared::{Layer, Vec2};

use crate::chunk::ChunkCoord;
use crate::config::{CreatureConfig, LayerConfig};
use crate::generator::{ColumnGenerator, ColumnPlacer};
use crate::height::HeightField;
use crate::registry::Placed;
use crate::seed::WorldSeed;
use crate::sink::{Element, ElementKind, Sink};

/// Range generator for creatures.
pub type Creatures = ColumnGenerator<CreaturePlacer>;

/// Decides and places at most one creature per column.
#[derive(Clone, Debug)]
pub struct CreaturePlacer {
    height: HeightField,
    seed: WorldSeed,
    probability: f64,
    size: Vec2,
    layer: Layer,
}

impl CreaturePlacer {
    /// Creates a placer.
    #[must_use]
    pub fn new(height: HeightField, settings: &CreatureConfig, layers: &LayerConfig) -> Self {
        Self {
            height,
            seed: height.seed(),
            probability: settings.creature_probability,
            size: Vec2::new(settings.width, settings.height),
            layer: layers.creature,
        }
    }

    /// Behaviour seed for a creature spawned at `world_x`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn behaviour_seed(&self, world_x: f64) -> u64 {
        self.seed.value().wrapping_add(world_x as i64 as u64)
    }
}

impl ColumnPlacer for CreaturePlacer {
    const NAME: &'static str = "creatures";

    fn place(&self, coord: ChunkCoord, world_x: f64, sink: &mut dyn Sink) -> Vec<Placed> {
        let mut rng = self.seed.column_rng(WorldSeed::CREATURES, coord.index());
        if rng.gen::<f64>() >= self.probability {
            return Vec::new();
        }

        let position = self.height.spawn_point(world_x as f32, self.size.y);
        let kind = ElementKind::Creature { behaviour_seed: self.behaviour_seed(world_x) };
        let id = sink.insert(Element::new(kind, position, self.size), self.layer);
        vec![Placed { id, layer: self.layer }]
    }
}
