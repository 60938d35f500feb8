//! # Verdant Shared
//!
//! Common types used by the streaming engine and by whatever presents its
//! output (renderer, physics, audio).
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a windowing, GPU or physics crate.
//! Collaborators translate these types into their own.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{Layer, BLOCK_SIZE, LEAF_SIZE, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
pub use math::Vec2;
