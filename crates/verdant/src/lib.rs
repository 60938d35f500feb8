//! # Verdant
//!
//! Headless driving for the streaming engine: scripted viewpoint walks over
//! a [`verdant_world::World`] with an auditing sink.
//!
//! ```text
//! Tick N:
//! ┌───────────────────────────────────────────────────────────┐
//! │ 1. ADVANCE VIEWPOINT (script)                             │
//! │ 2. WORLD TICK                                             │
//! │    ├─ ground      create band edge, remove far edge       │
//! │    ├─ vegetation  create band edge, remove far edge       │
//! │    └─ creatures   create band edge, remove far edge       │
//! │ 3. AUDIT (sink live count vs. registries)                 │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod walk;

pub use walk::{run_walk, WalkLeg, WalkScript, WalkSummary};
