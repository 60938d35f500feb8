//! # World Configuration
//!
//! All tunables are loaded from TOML once at startup. Every section has
//! defaults, so an empty file describes the stock world:
//!
//! ```toml
//! seed = 0
//!
//! [terrain]
//! block_size = 30.0
//! depth_rows = 20
//! collision_rows = 8
//!
//! [vegetation]
//! tree_probability = 0.03
//! ```
//!
//! A config must pass [`WorldConfig::validate`] before a world is built from
//! it. [`WorldConfig::from_toml_str`] and [`WorldConfig::from_file`] validate
//! on the way in.

use std::path::Path;

use serde::{Deserialize, Serialize};
use verdant_shared::{Layer, BLOCK_SIZE, LEAF_SIZE, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

use crate::error::{ConfigError, WorldResult};
use crate::seed::WorldSeed;

/// Complete world configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Seed for terrain shape and every placement decision.
    pub seed: WorldSeed,
    /// Ground columns.
    pub terrain: TerrainConfig,
    /// Trees.
    pub vegetation: VegetationConfig,
    /// Creatures.
    pub creatures: CreatureConfig,
    /// Layers each element kind is inserted into.
    pub layers: LayerConfig,
    /// Band geometry and chunk width.
    pub streaming: StreamingConfig,
}

/// Ground column settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerrainConfig {
    /// Edge length of a ground block.
    pub block_size: f32,
    /// Blocks per column, surface included.
    pub depth_rows: u32,
    /// Top rows inserted into the colliding ground layer.
    pub collision_rows: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self { block_size: BLOCK_SIZE, depth_rows: 20, collision_rows: 8 }
    }
}

/// Tree settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VegetationConfig {
    /// Chance that a column grows a tree.
    pub tree_probability: f64,
    /// Trunk height in world pixels.
    pub trunk_height: f32,
    /// Foliage grid width in cells.
    pub foliage_cols: u32,
    /// Foliage grid height in cells.
    pub foliage_rows: u32,
    /// Chance that a foliage cell holds a leaf.
    pub leaf_probability: f64,
    /// Edge length of a leaf.
    pub leaf_size: f32,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        Self {
            tree_probability: 0.03,
            trunk_height: 300.0,
            foliage_cols: 7,
            foliage_rows: 6,
            leaf_probability: 0.7,
            leaf_size: LEAF_SIZE,
        }
    }
}

/// Creature settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreatureConfig {
    /// Chance that a column spawns a creature.
    pub creature_probability: f64,
    /// Creature body width.
    pub width: f32,
    /// Creature body height.
    pub height: f32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self { creature_probability: 0.02, width: 50.0, height: 50.0 }
    }
}

/// Layer assignment per element kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayerConfig {
    /// Colliding ground rows.
    pub ground: Layer,
    /// Ground rows below `collision_rows`.
    pub deep_ground: Layer,
    /// Tree trunks.
    pub trunk: Layer,
    /// Leaves.
    pub leaf: Layer,
    /// Creatures.
    pub creature: Layer,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            ground: Layer::GROUND,
            deep_ground: Layer::DEEP_GROUND,
            trunk: Layer::TRUNK,
            leaf: Layer::LEAF,
            creature: Layer::CREATURE,
        }
    }
}

/// Band geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamingConfig {
    /// Column width every generator snaps to.
    pub chunk_width: u32,
    /// Viewport width.
    pub viewport_width: f32,
    /// Viewport height. Also scales the terrain.
    pub viewport_height: f32,
    /// Half-width of the band in viewport widths.
    pub extent_factor: f64,
    /// Where the viewpoint starts.
    pub spawn_x: f32,
    /// Height of the body placed at `spawn_x`.
    pub spawn_body_height: f32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_width: 30,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            extent_factor: 2.0,
            spawn_x: 500.0,
            spawn_body_height: 60.0,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> WorldResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`WorldConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Fails only if a value has no TOML representation.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Checks every value a world depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> WorldResult<()> {
        let terrain = &self.terrain;
        let vegetation = &self.vegetation;
        let creatures = &self.creatures;
        let streaming = &self.streaming;

        if streaming.chunk_width == 0 {
            return Err(ConfigError::invalid("streaming.chunk_width", "must be positive"));
        }
        positive("streaming.viewport_width", f64::from(streaming.viewport_width))?;
        positive("streaming.viewport_height", f64::from(streaming.viewport_height))?;
        positive("streaming.extent_factor", streaming.extent_factor)?;
        if !streaming.spawn_x.is_finite() {
            return Err(ConfigError::invalid("streaming.spawn_x", "must be finite"));
        }
        non_negative("streaming.spawn_body_height", f64::from(streaming.spawn_body_height))?;

        positive("terrain.block_size", f64::from(terrain.block_size))?;
        if terrain.depth_rows == 0 {
            return Err(ConfigError::invalid("terrain.depth_rows", "must be positive"));
        }
        if terrain.collision_rows > terrain.depth_rows {
            return Err(ConfigError::invalid(
                "terrain.collision_rows",
                format!(
                    "{} exceeds depth_rows ({})",
                    terrain.collision_rows, terrain.depth_rows
                ),
            ));
        }

        probability("vegetation.tree_probability", vegetation.tree_probability)?;
        probability("vegetation.leaf_probability", vegetation.leaf_probability)?;
        positive("vegetation.trunk_height", f64::from(vegetation.trunk_height))?;
        positive("vegetation.leaf_size", f64::from(vegetation.leaf_size))?;
        if vegetation.foliage_cols == 0 || vegetation.foliage_rows == 0 {
            return Err(ConfigError::invalid(
                "vegetation.foliage",
                format!(
                    "foliage grid {}x{} is empty",
                    vegetation.foliage_cols, vegetation.foliage_rows
                ),
            ));
        }

        probability("creatures.creature_probability", creatures.creature_probability)?;
        positive("creatures.width", f64::from(creatures.width))?;
        positive("creatures.height", f64::from(creatures.height))?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> WorldResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> WorldResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must not be negative, got {value}")))
    }
}

fn probability(field: &'static str, value: f64) -> WorldResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be within [0, 1], got {value}")))
    }
}
