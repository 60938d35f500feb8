//! # Verdant World
//!
//! Procedural generation and streaming for an endless 2D side-scroller.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same world, in any
//!    visit order
//! 2. **Chunked**: Every generator snaps ranges to the same column grid
//! 3. **Streamable**: Columns are created and discarded independently
//! 4. **Bounded**: The live band has a fixed width however far you walk
//!
//! ## Core Components
//!
//! - `HeightField`: Terrain surface as a pure function of x
//! - `ChunkGrid`: Column quantization
//! - `RangeGenerator`: Create/remove by range (ground, vegetation, creatures)
//! - `StreamingCoordinator`: Slides the band with the viewpoint
//! - `World`: Builds all of the above from a `WorldConfig`
//!
//! ## Example
//!
//! ```rust,ignore
//! use verdant_world::{LayerCollection, World, WorldConfig};
//! use verdant_shared::Vec2;
//!
//! let mut world = World::new(WorldConfig::default())?;
//! let mut sink = LayerCollection::new();
//! world.materialize(&mut sink);
//!
//! // Viewpoint walks right
//! world.tick(Vec2::new(500.0, 0.0), &mut sink);
//! world.tick(Vec2::new(600.0, 0.0), &mut sink);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod config;
pub mod creatures;
pub mod error;
pub mod generator;
pub mod ground;
pub mod height;
pub mod registry;
pub mod seed;
pub mod sink;
pub mod streaming;
pub mod vegetation;
pub mod world;

pub use chunk::{ChunkCoord, ChunkGrid, ColumnSpan};
pub use config::{
    CreatureConfig, LayerConfig, StreamingConfig, TerrainConfig, VegetationConfig, WorldConfig,
};
pub use creatures::{CreaturePlacer, Creatures};
pub use error::{ConfigError, WorldResult};
pub use generator::{ColumnGenerator, ColumnPlacer, RangeGenerator, RangeReport};
pub use ground::{Ground, GroundPlacer};
pub use height::HeightField;
pub use registry::{ColumnRegistry, Placed};
pub use seed::WorldSeed;
pub use sink::{Element, ElementId, ElementKind, LayerCollection, Sink};
pub use streaming::{Band, Direction, StreamingCoordinator, StreamingStats, TickReport, TrackingState};
pub use vegetation::{TreePlacer, Vegetation};
pub use world::World;
