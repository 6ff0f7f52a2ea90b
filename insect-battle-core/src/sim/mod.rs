pub mod accuracy;
pub mod ai;
pub mod arthropod;
pub mod battle;
pub mod damage;
pub mod environment;
pub mod mode;
pub mod order;
pub mod rng;
pub mod simulate;
pub mod stages;
pub mod status;

pub use ai::AiPolicy;
pub use arthropod::Arthropod;
pub use battle::{BattleResult, BattleState, Side};
pub use simulate::{
    simulate_battle, simulate_battle_with_replay, simulate_many, SimulationOptions,
    SimulationSummary,
};
