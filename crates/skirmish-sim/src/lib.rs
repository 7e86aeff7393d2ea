//! Simulation engine for Skirmish.
//!
//! Owns the entity store, runs the per-tick systems in a fixed order and
//! produces a `SceneSnapshot` for the presentation layer after every frame.
//! Completely headless: the host supplies millisecond timestamps and input
//! actions, which keeps every scenario testable with injected time and seeds.

pub mod context;
pub mod engine;
pub mod score;
pub mod store;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use skirmish_core as core;

#[cfg(test)]
mod tests;
