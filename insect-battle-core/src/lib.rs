//! Turn-based arthropod battle simulation core.
//!
//! The main entry points are [`sim::simulate_battle`] for AI-driven battles
//! and [`engine::BattleEngine`] for step-based simulations.

pub mod battle_logger;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod recorder;
pub mod replay;
pub mod sim;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::config::{BalanceConstants, BattleConfig, Capabilities, HpFormula, Initiative};
    pub use crate::data::actions::{get_action, Action};
    pub use crate::data::species::{get_species, SpeciesData, SPECIES_LIST};
    pub use crate::engine::{BattleEngine, StepResult};
    pub use crate::error::{BattleError, ReplayError};
    pub use crate::recorder::{BattleRecorder, MatchLog};
    pub use crate::sim::battle::{execute_turn, BattleLogEntry};
    pub use crate::sim::environment::Environment;
    pub use crate::sim::{
        simulate_battle, simulate_battle_with_replay, simulate_many, AiPolicy, Arthropod,
        BattleResult, BattleState, Side, SimulationOptions, SimulationSummary,
    };
}
