//! # World
//!
//! Wires a validated [`WorldConfig`] into a height field, the three
//! generators and a coordinator. Generators run ground first, then
//! vegetation, then creatures, so trees and creatures always find ground
//! under them in the same tick.

use std::path::Path;

use tracing::info;
use verdant_shared::Vec2;

use crate::chunk::ChunkGrid;
use crate::config::WorldConfig;
use crate::creatures::{CreaturePlacer, Creatures};
use crate::error::WorldResult;
use crate::generator::RangeReport;
use crate::ground::{Ground, GroundPlacer};
use crate::height::HeightField;
use crate::seed::WorldSeed;
use crate::sink::Sink;
use crate::streaming::{Band, StreamingCoordinator, TickReport};
use crate::vegetation::{TreePlacer, Vegetation};

/// A streaming world built from one configuration.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    height: HeightField,
    coordinator: StreamingCoordinator,
}

impl World {
    /// Builds a world. The band starts centered on `streaming.spawn_x` and
    /// nothing is inserted until [`World::materialize`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Invalid`] if the config fails validation.
    pub fn new(config: WorldConfig) -> WorldResult<Self> {
        config.validate()?;

        let streaming = &config.streaming;
        let terrain = &config.terrain;
        let height = HeightField::new(
            config.seed,
            streaming.viewport_height,
            terrain.block_size,
            terrain.depth_rows,
        );
        let grid = ChunkGrid::new(streaming.chunk_width);
        let band = StreamingCoordinator::initial_band(
            f64::from(streaming.spawn_x),
            f64::from(streaming.viewport_width),
            streaming.extent_factor,
        );

        let coordinator = StreamingCoordinator::new(band)
            .with_generator(Box::new(Ground::new(grid, GroundPlacer::new(height, terrain, &config.layers))))
            .with_generator(Box::new(Vegetation::new(
                grid,
                TreePlacer::new(height, &config.vegetation, terrain, &config.layers),
            )))
            .with_generator(Box::new(Creatures::new(
                grid,
                CreaturePlacer::new(height, &config.creatures, &config.layers),
            )));

        info!(
            seed = config.seed.value(),
            chunk_width = grid.width(),
            left = band.left,
            right = band.right,
            "world built"
        );

        Ok(Self { config, height, coordinator })
    }

    /// Loads, validates and builds.
    ///
    /// # Errors
    ///
    /// See [`WorldConfig::from_file`].
    pub fn from_file(path: impl AsRef<Path>) -> WorldResult<Self> {
        Self::new(WorldConfig::from_file(path)?)
    }

    /// Configuration this world was built from.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The world seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.config.seed
    }

    /// Terrain surface.
    #[must_use]
    pub const fn height_field(&self) -> &HeightField {
        &self.height
    }

    /// Surface height at `x`.
    #[must_use]
    pub fn height_at(&self, x: f64) -> f64 {
        self.height.height_at(x)
    }

    /// Where the configured body starts, resting on the surface.
    #[must_use]
    pub fn spawn_point(&self) -> Vec2 {
        let streaming = &self.config.streaming;
        self.height.spawn_point(streaming.spawn_x, streaming.spawn_body_height)
    }

    /// The coordinator.
    #[must_use]
    pub const fn coordinator(&self) -> &StreamingCoordinator {
        &self.coordinator
    }

    /// Current frontiers.
    #[must_use]
    pub const fn band(&self) -> Band {
        self.coordinator.band()
    }

    /// Creates the initial band.
    pub fn materialize(&mut self, sink: &mut dyn Sink) -> RangeReport {
        self.coordinator.materialize(sink)
    }

    /// Advances one tick.
    pub fn tick(&mut self, viewpoint: Vec2, sink: &mut dyn Sink) -> TickReport {
        self.coordinator.update(viewpoint, sink)
    }

    /// Tears the band down.
    pub fn reset(&mut self, sink: &mut dyn Sink) -> RangeReport {
        self.coordinator.reset(sink)
    }
}
