//! Simulation engine for Chariot Arena.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the presentation layer.

pub mod arena;
pub mod effects;
pub mod engine;
pub mod progression;
pub mod round;
pub mod score;
pub mod spawner;
pub mod systems;
pub mod weapons;

pub use chariot_core as core;
pub use engine::SimulationEngine;
