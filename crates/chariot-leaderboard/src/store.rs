//! JSON file persistence for the leaderboard.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::board::Leaderboard;
use crate::error::LeaderboardError;

/// Load the board at `path`. A missing file is an empty board.
pub fn load_from_file(path: &Path) -> Result<Leaderboard, LeaderboardError> {
    if !path.exists() {
        debug!(path = %path.display(), "no leaderboard file yet");
        return Ok(Leaderboard::new());
    }
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Write the board to `path`, creating parent directories as needed.
pub fn save_to_file(path: &Path, board: &Leaderboard) -> Result<(), LeaderboardError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(board)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), entries = board.len(), "leaderboard saved");
    Ok(())
}
