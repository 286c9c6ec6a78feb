//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::UpgradeId;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Game flow ---
    /// Leave the main menu and start round 1.
    StartGame,
    /// Throw away the current game and start over.
    Restart,
    /// Return to the main menu.
    ReturnToMenu,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal). Only the real-time runner uses it.
    SetTimeScale { scale: f64 },

    // --- Play ---
    /// Desired movement direction. Normalized by the engine; zero stops.
    SetMoveIntent { x: f64, y: f64 },
    /// Pick one of the cards in the current upgrade offer.
    SelectUpgrade { upgrade: UpgradeId },
    /// Dismiss the round summary and start the next round.
    ContinueRound,

    // --- Debug ---
    /// Remove every enemy and complete the round immediately.
    SkipRound,
}

impl PlayerCommand {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartGame => "StartGame",
            Self::Restart => "Restart",
            Self::ReturnToMenu => "ReturnToMenu",
            Self::Pause => "Pause",
            Self::Resume => "Resume",
            Self::SetTimeScale { .. } => "SetTimeScale",
            Self::SetMoveIntent { .. } => "SetMoveIntent",
            Self::SelectUpgrade { .. } => "SelectUpgrade",
            Self::ContinueRound => "ContinueRound",
            Self::SkipRound => "SkipRound",
        }
    }
}
