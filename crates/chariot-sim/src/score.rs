//! Final score computation.

use chariot_core::constants::{SCORE_PER_KILL, SCORE_PER_LEVEL, SCORE_PER_SECOND};
use chariot_core::state::{GameSummary, ScoreBreakdown};

/// Score components: 100 per kill, 500 per level, 10 per whole second.
pub fn score_breakdown(total_killed: u32, level: u32, game_time_ms: f64) -> ScoreBreakdown {
    let seconds = (game_time_ms.max(0.0) / 1000.0).floor() as u64;
    ScoreBreakdown {
        kills: total_killed as u64 * SCORE_PER_KILL,
        level: level as u64 * SCORE_PER_LEVEL,
        time: seconds * SCORE_PER_SECOND,
    }
}

pub fn final_score(total_killed: u32, level: u32, game_time_ms: f64) -> u64 {
    let b = score_breakdown(total_killed, level, game_time_ms);
    b.kills + b.level + b.time
}

pub fn game_summary(total_killed: u32, level: u32, round: u32, game_time_ms: f64) -> GameSummary {
    let breakdown = score_breakdown(total_killed, level, game_time_ms);
    GameSummary {
        score: breakdown.kills + breakdown.level + breakdown.time,
        breakdown,
        total_killed,
        level,
        round,
        game_time_ms,
    }
}
