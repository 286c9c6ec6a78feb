//! Runner configuration, read from an optional TOML file.
//!
//! ```toml
//! [sim]
//! seed = 7
//! starting_round = 1
//! time_scale = 1.0
//!
//! [run]
//! max_ticks = 36000
//! realtime = false
//! snapshot_every = 600
//!
//! [leaderboard]
//! path = "chariot-leaderboard.json"
//! player_name = "Ava"
//! submit = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use chariot_core::constants::TICK_RATE;
use chariot_sim::engine::SimConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub sim: SimSection,
    pub run: RunSection,
    pub leaderboard: LeaderboardSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimSection {
    pub seed: u64,
    pub starting_round: u32,
    pub time_scale: f64,
}

impl Default for SimSection {
    fn default() -> Self {
        let sim = SimConfig::default();
        Self {
            seed: sim.seed,
            starting_round: sim.starting_round,
            time_scale: sim.time_scale,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunSection {
    /// Hard stop, in ticks, for games that do not end on their own.
    pub max_ticks: u64,
    /// Pace ticks at wall-clock speed instead of running flat out.
    pub realtime: bool,
    /// Log a progress line every this many ticks (0 = never).
    pub snapshot_every: u64,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            max_ticks: 10 * 60 * TICK_RATE as u64,
            realtime: false,
            snapshot_every: 10 * TICK_RATE as u64,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LeaderboardSection {
    pub path: PathBuf,
    pub player_name: Option<String>,
    pub submit: bool,
}

impl Default for LeaderboardSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("chariot-leaderboard.json"),
            player_name: None,
            submit: false,
        }
    }
}

impl RunnerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse runner config toml")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.sim.seed,
            time_scale: self.sim.time_scale,
            starting_round: self.sim.starting_round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RunnerConfig::from_toml_str("").unwrap();
        assert_eq!(config.sim.seed, 42);
        assert_eq!(config.sim.starting_round, 1);
        assert_eq!(config.run.max_ticks, 36_000);
        assert!(!config.run.realtime);
        assert!(!config.leaderboard.submit);
        assert_eq!(config.leaderboard.path, PathBuf::from("chariot-leaderboard.json"));
    }

    #[test]
    fn test_partial_sections() {
        let config = RunnerConfig::from_toml_str(
            r#"
            [sim]
            seed = 7

            [leaderboard]
            player_name = "Ava"
            submit = true
            "#,
        )
        .unwrap();
        assert_eq!(config.sim.seed, 7);
        assert_eq!(config.sim.time_scale, 1.0);
        assert_eq!(config.leaderboard.player_name.as_deref(), Some("Ava"));
        assert!(config.leaderboard.submit);

        let sim = config.sim_config();
        assert_eq!(sim.seed, 7);
        assert_eq!(sim.starting_round, 1);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(RunnerConfig::from_toml_str("[sim]\nseed = \"seven\"").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("chariot_test_no_such_config.toml");
        let err = RunnerConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
