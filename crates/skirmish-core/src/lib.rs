//! Core types and definitions for the Skirmish arena simulation.
//!
//! This crate defines the vocabulary shared by the simulation and by any
//! presentation layer: geometry, components, enums, configuration, input
//! actions, events and the per-frame snapshot. It has no dependency on a
//! renderer, windowing system or clock.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
