//! Error types for the battle core.

use thiserror::Error;

/// Errors surfaced to callers of the battle core.
///
/// In-battle failures (misses, blocked turns, capped stages) are not errors;
/// they are narrated in the battle log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BattleError {
    /// A combatant was asked to act but has no usable actions configured.
    #[error("{species} has no actions configured")]
    NoActions { species: String },

    /// A species id could not be found in the species table.
    #[error("unknown species: {0}")]
    UnknownSpecies(String),

    /// A caller picked an action the combatant does not have.
    #[error("{species} has no action {action}")]
    UnknownAction { species: String, action: String },
}

pub type Result<T> = std::result::Result<T, BattleError>;

/// Errors raised while validating or replaying a recorded match.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("match log {0} contains no recorded actions")]
    EmptyLog(String),

    #[error("sequence gap: expected {expected}, found {found}")]
    SequenceGap { expected: u32, found: u32 },

    #[error("replayed state diverges from the snapshot at sequence {sequence}")]
    SnapshotMismatch { sequence: u32 },
}
