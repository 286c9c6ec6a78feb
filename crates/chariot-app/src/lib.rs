//! Chariot Arena headless runner.
//!
//! Wires the simulation, the autopilot and the leaderboard together behind a
//! fixed-rate game loop thread. The `chariot` binary is a thin CLI over this.

pub mod autopilot;
pub mod config;
pub mod game_loop;

pub use chariot_core as core;
