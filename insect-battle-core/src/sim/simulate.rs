use crate::config::BattleConfig;
use crate::data::species::SpeciesData;
use crate::error::Result;
use crate::recorder::{BattleRecorder, MatchLog};
use crate::sim::ai::AiPolicy;
use crate::sim::arthropod::Arthropod;
use crate::sim::battle::{execute_turn_recorded, BattleLogEntry, BattleResult, BattleState};
use crate::sim::environment::Environment;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::info;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulationOptions {
    pub config: BattleConfig,
    pub environment: Option<Environment>,
    pub policy_a: AiPolicy,
    pub policy_b: AiPolicy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub battles: u32,
    pub a_wins: u32,
    pub b_wins: u32,
    pub draws: u32,
    /// Side A win rate in percent.
    pub win_rate: f64,
    pub avg_turns: f64,
}

pub fn new_battle(
    species_a: &'static SpeciesData,
    species_b: &'static SpeciesData,
    options: &SimulationOptions,
) -> BattleState {
    let hp_formula = options.config.balance.hp_formula;
    BattleState::new(
        Arthropod::new(species_a, hp_formula),
        Arthropod::new(species_b, hp_formula),
        options.environment,
    )
}

/// Ends a battle that hit the turn cap: the higher HP ratio wins,
/// an exact tie is a draw.
pub fn settle_by_hp(mut state: BattleState) -> BattleState {
    let ratio_a = state.arthropod_a.hp_ratio();
    let ratio_b = state.arthropod_b.hp_ratio();
    let result = match ratio_a.partial_cmp(&ratio_b) {
        Some(Ordering::Greater) => BattleResult::SideAWins,
        Some(Ordering::Less) => BattleResult::SideBWins,
        _ => BattleResult::Draw,
    };
    state.finish(result);
    state.log.push(BattleLogEntry::text(
        state.turn,
        None,
        "The turn limit was reached. Remaining HP decides the battle.",
    ));
    state
}

/// Drives `state` to completion with AI-chosen actions.
pub fn run_battle<R: Rng + ?Sized>(
    mut state: BattleState,
    options: &SimulationOptions,
    rng: &mut R,
    mut recorder: Option<&mut BattleRecorder>,
) -> Result<BattleState> {
    while !state.is_finished() {
        if state.turn >= options.config.max_turns {
            state = settle_by_hp(state);
            break;
        }
        let action_a = options
            .policy_a
            .choose_action(&state.arthropod_a, &state.arthropod_b, rng)?;
        let action_b = options
            .policy_b
            .choose_action(&state.arthropod_b, &state.arthropod_a, rng)?;
        state = execute_turn_recorded(
            &state,
            action_a,
            action_b,
            &options.config,
            rng,
            recorder.as_deref_mut(),
        );
    }
    info!(
        a = state.arthropod_a.species.id,
        b = state.arthropod_b.species.id,
        turns = state.turn,
        winner = ?state.winner,
        "battle finished"
    );
    Ok(state)
}

pub fn simulate_battle<R: Rng + ?Sized>(
    species_a: &'static SpeciesData,
    species_b: &'static SpeciesData,
    options: &SimulationOptions,
    rng: &mut R,
) -> Result<BattleState> {
    run_battle(new_battle(species_a, species_b, options), options, rng, None)
}

pub fn simulate_battle_with_replay<R: Rng + ?Sized>(
    species_a: &'static SpeciesData,
    species_b: &'static SpeciesData,
    options: &SimulationOptions,
    rng: &mut R,
    match_id: &str,
) -> Result<(BattleState, MatchLog)> {
    let state = new_battle(species_a, species_b, options);
    let mut recorder = BattleRecorder::new(&state.arthropod_a, &state.arthropod_b);
    let state = run_battle(state, options, rng, Some(&mut recorder))?;
    let log = recorder.into_match_log(format!("{match_id}-log"), match_id);
    Ok((state, log))
}

/// Runs `count` battles on one seeded RNG, keeping only running totals.
pub fn simulate_many(
    species_a: &'static SpeciesData,
    species_b: &'static SpeciesData,
    count: u32,
    options: &SimulationOptions,
    seed: u64,
) -> Result<SimulationSummary> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut summary = SimulationSummary {
        battles: count,
        ..SimulationSummary::default()
    };
    let mut total_turns = 0u64;
    for _ in 0..count {
        let state = simulate_battle(species_a, species_b, options, &mut rng)?;
        total_turns += u64::from(state.turn);
        match state.winner {
            Some(BattleResult::SideAWins) => summary.a_wins += 1,
            Some(BattleResult::SideBWins) => summary.b_wins += 1,
            Some(BattleResult::Draw) | None => summary.draws += 1,
        }
    }
    if count > 0 {
        summary.win_rate = f64::from(summary.a_wins) / f64::from(count) * 100.0;
        summary.avg_turns = total_turns as f64 / f64::from(count);
    }
    Ok(summary)
}
