//! Errors raised by submissions and the file store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("player name is empty")]
    EmptyName,
    #[error("player name is {len} characters long, the limit is {max}")]
    NameTooLong { len: usize, max: usize },
    #[error("leaderboard file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
