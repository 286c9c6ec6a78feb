//! Submission validation, ranking and top-N listing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LeaderboardError;

/// Longest accepted player name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 50;

/// A repeat of the same name and score inside this window is not stored again.
pub const DUPLICATE_WINDOW_MS: u64 = 30_000;

/// Rankings at or above this place count as top ten.
pub const TOP_TEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Submission order. Earlier submissions win ties.
    pub id: u64,
    pub name: String,
    pub score: u64,
    /// Wall-clock submission time, milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

/// Outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub entry: LeaderboardEntry,
    /// 1-based place on the board.
    pub ranking: usize,
    pub is_top_ten: bool,
    /// False when a recent identical submission was returned instead.
    pub created: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    next_id: u64,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in submission order.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Record a score for `name` at wall-clock time `now_ms`.
    pub fn submit(
        &mut self,
        name: &str,
        score: u64,
        now_ms: u64,
    ) -> Result<Submission, LeaderboardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeaderboardError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(LeaderboardError::NameTooLong {
                len,
                max: MAX_NAME_LEN,
            });
        }

        let recent = self
            .entries
            .iter()
            .filter(|e| {
                e.name == name
                    && e.score == score
                    && now_ms.abs_diff(e.timestamp_ms) <= DUPLICATE_WINDOW_MS
            })
            .max_by_key(|e| e.id);
        if let Some(existing) = recent {
            debug!(name, score, id = existing.id, "duplicate submission");
            return Ok(self.describe(existing.clone(), false));
        }

        let entry = LeaderboardEntry {
            id: self.next_id,
            name: name.to_string(),
            score,
            timestamp_ms: now_ms,
        };
        self.next_id += 1;
        self.entries.push(entry.clone());
        debug!(name, score, id = entry.id, "score submitted");
        Ok(self.describe(entry, true))
    }

    /// 1-based place: one plus every higher score plus every equal score
    /// submitted earlier.
    pub fn ranking(&self, entry: &LeaderboardEntry) -> usize {
        1 + self
            .entries
            .iter()
            .filter(|e| e.score > entry.score || (e.score == entry.score && e.id < entry.id))
            .count()
    }

    /// Best `n` entries, score descending then submission order.
    pub fn top(&self, n: usize) -> Vec<LeaderboardEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
        sorted.truncate(n);
        sorted
    }

    fn describe(&self, entry: LeaderboardEntry, created: bool) -> Submission {
        let ranking = self.ranking(&entry);
        Submission {
            entry,
            ranking,
            is_top_ten: ranking <= TOP_TEN,
            created,
        }
    }
}
