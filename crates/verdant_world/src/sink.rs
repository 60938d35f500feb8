//! # Element Sink
//!
//! The engine never owns live world objects. It describes each one as an
//! [`Element`], hands it to a [`Sink`] together with a [`Layer`], and keeps
//! the [`ElementId`] the sink returns until the column leaves the band.
//!
//! [`LayerCollection`] is an in-memory sink that counts every insert and
//! removal. Headless drivers and tests use it to check that no handle leaks.

use std::collections::HashMap;

use verdant_shared::{Layer, Vec2};

/// Opaque handle minted by a sink for one inserted element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// What an element is. The collaborator picks visuals from this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Top block of a ground column (grassy)
    GroundSurface,
    /// Any block below the surface
    Ground,
    /// Tree trunk
    Trunk,
    /// Foliage cell
    Leaf,
    /// Mobile creature resting on the surface
    Creature {
        /// Seed for the creature's own behaviour (jump timing etc.)
        behaviour_seed: u64,
    },
}

/// Description of one world element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Element {
    /// What it is.
    pub kind: ElementKind,
    /// Top-left corner in world pixels.
    pub position: Vec2,
    /// Width and height in world pixels.
    pub size: Vec2,
}

impl Element {
    /// Creates an element description.
    #[must_use]
    pub const fn new(kind: ElementKind, position: Vec2, size: Vec2) -> Self {
        Self { kind, position, size }
    }
}

/// The external collection live elements are inserted into.
///
/// Implemented by the presentation layer (a scene graph, an ECS world, ...).
pub trait Sink {
    /// Inserts `element` into `layer`, returning the handle used to remove it.
    fn insert(&mut self, element: Element, layer: Layer) -> ElementId;

    /// Removes a previously inserted element from `layer`.
    fn remove(&mut self, id: ElementId, layer: Layer);
}

/// In-memory sink that keeps every live element and audits removals.
#[derive(Debug, Default)]
pub struct LayerCollection {
    /// Next handle to mint.
    next_id: u64,
    /// Live elements by handle.
    live: HashMap<ElementId, (Element, Layer)>,
    /// Total inserts since creation.
    inserted: u64,
    /// Total successful removals since creation.
    removed: u64,
    /// Removals naming an unknown handle or the wrong layer.
    stray: Vec<(ElementId, Layer)>,
}

impl LayerCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns true if nothing is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Looks up a live element.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&(Element, Layer)> {
        self.live.get(&id)
    }

    /// Returns true if `id` is live.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.live.contains_key(&id)
    }

    /// Iterates live elements in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element, Layer)> {
        self.live.iter().map(|(&id, (element, layer))| (id, element, *layer))
    }

    /// Number of live elements in `layer`.
    #[must_use]
    pub fn count_in_layer(&self, layer: Layer) -> usize {
        self.live.values().filter(|(_, l)| *l == layer).count()
    }

    /// Total inserts ever performed.
    #[must_use]
    pub const fn inserted_total(&self) -> u64 {
        self.inserted
    }

    /// Total successful removals ever performed.
    #[must_use]
    pub const fn removed_total(&self) -> u64 {
        self.removed
    }

    /// Removals that did not match a live element in the given layer.
    ///
    /// Empty for a correctly behaving engine.
    #[must_use]
    pub fn stray_removals(&self) -> &[(ElementId, Layer)] {
        &self.stray
    }
}

impl Sink for LayerCollection {
    fn insert(&mut self, element: Element, layer: Layer) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.inserted += 1;
        self.live.insert(id, (element, layer));
        id
    }

    fn remove(&mut self, id: ElementId, layer: Layer) {
        match self.live.get(&id) {
            Some((_, live_layer)) if *live_layer == layer => {
                self.live.remove(&id);
                self.removed += 1;
            }
            _ => self.stray.push((id, layer)),
        }
    }
}
