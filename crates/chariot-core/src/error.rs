//! Errors raised when a command cannot be applied to the simulation.

use thiserror::Error;

use crate::enums::{GamePhase, UpgradeId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("command `{command}` is not valid during {phase:?}")]
    InvalidPhase {
        command: &'static str,
        phase: GamePhase,
    },
    #[error("upgrade `{0}` is not part of the current offer")]
    UpgradeNotOffered(UpgradeId),
    #[error("upgrade `{upgrade}` is already at its maximum level {max_level}")]
    UpgradeMaxed { upgrade: UpgradeId, max_level: u32 },
    #[error("unknown upgrade id `{0}`")]
    UnknownUpgrade(String),
}
