//! # World & Layer Constants
//!
//! Default geometry of the world and the presentation layers elements are
//! inserted into.
//!
//! **NOTE:** These are defaults only. Every value the engine depends on can be
//! overridden through `WorldConfig`.

use serde::{Deserialize, Serialize};

// =============================================================================
// GEOMETRY
// =============================================================================

/// Edge length of a ground block, in world pixels
pub const BLOCK_SIZE: f32 = 30.0;

/// Edge length of a foliage cell, in world pixels
pub const LEAF_SIZE: f32 = 30.0;

/// Default viewport width, in world pixels
pub const VIEWPORT_WIDTH: f32 = 1400.0;

/// Default viewport height, in world pixels
pub const VIEWPORT_HEIGHT: f32 = 700.0;

// =============================================================================
// LAYERS
// =============================================================================

/// Presentation/collision channel an element lives in.
///
/// The engine only needs stable identity; the collaborator decides what a
/// layer means (draw order, which layers collide).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer(pub i32);

impl Layer {
    /// Sky and other scenery
    pub const BACKGROUND: Self = Self(-200);
    /// Immovable world content
    pub const STATIC_OBJECTS: Self = Self(-100);
    /// Default layer for anything else
    pub const DEFAULT: Self = Self(0);
    /// Overlays drawn above the world
    pub const FOREGROUND: Self = Self(100);

    /// Colliding ground rows
    pub const GROUND: Self = Self::STATIC_OBJECTS;
    /// Deep ground rows: drawn, never collided with
    pub const DEEP_GROUND: Self = Self(Self::BACKGROUND.0 + 10);
    /// Tree trunks
    pub const TRUNK: Self = Self::STATIC_OBJECTS;
    /// Foliage
    pub const LEAF: Self = Self(Self::STATIC_OBJECTS.0 + 1);
    /// The player avatar
    pub const AVATAR: Self = Self(Self::STATIC_OBJECTS.0 + 2);
    /// Creatures
    pub const CREATURE: Self = Self(Self::STATIC_OBJECTS.0 + 3);

    /// Returns a layer offset from this one.
    #[must_use]
    pub const fn offset(self, delta: i32) -> Self {
        Self(self.0 + delta)
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Layer pairs the physics collaborator should collide.
///
/// Deep ground appears in no pair.
pub const COLLIDING_LAYERS: [(Layer, Layer); 4] = [
    (Layer::LEAF, Layer::GROUND),
    (Layer::AVATAR, Layer::GROUND),
    (Layer::AVATAR, Layer::LEAF),
    (Layer::CREATURE, Layer::GROUND),
];

/// Returns true if elements in `a` and `b` should collide.
#[must_use]
pub fn layers_collide(a: Layer, b: Layer) -> bool {
    COLLIDING_LAYERS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}
