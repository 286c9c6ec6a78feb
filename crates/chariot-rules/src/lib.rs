//! Balance rules for Chariot Arena.
//!
//! Round composition, enemy profiles, drop tables, the upgrade catalog and
//! weapon formulas, plus enemy steering. Everything here is a pure function
//! over plain data. No ECS dependency.

pub mod composition;
pub mod drops;
pub mod profiles;
pub mod steering;
pub mod upgrades;
pub mod weapons;

pub use chariot_core as core;

#[cfg(test)]
mod tests;
