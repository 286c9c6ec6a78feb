//! Local leaderboard for Chariot Arena.
//!
//! Validates and ranks score submissions, lists the top ten, and persists
//! the board as a JSON file. Independent of the simulation: a failed
//! submission never touches a finished game's result.

pub mod board;
pub mod error;
pub mod store;

pub use board::{Leaderboard, LeaderboardEntry, Submission};
pub use error::LeaderboardError;
