//! High-level battle engine wrapper for step-based simulations.

use crate::config::BattleConfig;
use crate::data::actions::Action;
use crate::data::species::SpeciesData;
use crate::error::{BattleError, Result};
use crate::recorder::{BattleRecorder, MatchLog};
use crate::sim::arthropod::Arthropod;
use crate::sim::battle::{execute_turn_recorded, BattleLogEntry, BattleResult, BattleState, Side};
use crate::sim::environment::Environment;
use crate::sim::simulate::settle_by_hp;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Result of a single engine step.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Log entries produced by this step.
    pub events: Vec<BattleLogEntry>,
    /// State snapshot before the step.
    pub before: BattleState,
    /// State snapshot after the step.
    pub after: BattleState,
    /// Terminal outcome if the battle ended.
    pub outcome: Option<BattleResult>,
}

/// Step-based battle engine for callers that pick actions themselves.
pub struct BattleEngine {
    state: BattleState,
    config: BattleConfig,
    rng: SmallRng,
    recorder: Option<BattleRecorder>,
}

impl BattleEngine {
    pub fn new(
        species_a: &'static SpeciesData,
        species_b: &'static SpeciesData,
        config: BattleConfig,
        environment: Option<Environment>,
        seed: u64,
    ) -> Result<Self> {
        let hp_formula = config.balance.hp_formula;
        let arthropod_a = Arthropod::new(species_a, hp_formula);
        let arthropod_b = Arthropod::new(species_b, hp_formula);
        arthropod_a.ensure_actions()?;
        arthropod_b.ensure_actions()?;
        let environment = environment.filter(|_| config.capabilities.environment);
        Ok(Self {
            state: BattleState::new(arthropod_a, arthropod_b, environment),
            config,
            rng: SmallRng::seed_from_u64(seed),
            recorder: None,
        })
    }

    /// Starts recording every decision from now on.
    pub fn with_recorder(mut self) -> Self {
        self.recorder = Some(BattleRecorder::new(
            &self.state.arthropod_a,
            &self.state.arthropod_b,
        ));
        self
    }

    /// Advance the battle by one turn using the chosen action ids.
    pub fn step(&mut self, action_a: &str, action_b: &str) -> Result<StepResult> {
        let before = self.state.clone();
        if self.is_terminal() {
            return Ok(StepResult {
                events: Vec::new(),
                after: before.clone(),
                before,
                outcome: self.state.winner,
            });
        }
        let action_a = find_action(&self.state.arthropod_a, action_a)?;
        let action_b = find_action(&self.state.arthropod_b, action_b)?;

        self.state = execute_turn_recorded(
            &self.state,
            action_a,
            action_b,
            &self.config,
            &mut self.rng,
            self.recorder.as_mut(),
        );
        if !self.state.is_finished() && self.state.turn >= self.config.max_turns {
            self.state = settle_by_hp(self.state.clone());
        }

        let events = self.state.log[before.log.len()..].to_vec();
        Ok(StepResult {
            events,
            before,
            after: self.state.clone(),
            outcome: self.state.winner,
        })
    }

    /// Returns true if the current state is terminal.
    pub fn is_terminal(&self) -> bool {
        self.state.is_finished()
    }

    /// Action ids available to `side`.
    pub fn legal_actions(&self, side: Side) -> Vec<&'static str> {
        self.state.side(side).actions.iter().map(|action| action.id).collect()
    }

    /// Access the internal battle state.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Consumes the engine and returns the recorded log, if recording was on.
    pub fn into_match_log(self, match_id: &str) -> Option<MatchLog> {
        self.recorder
            .map(|recorder| recorder.into_match_log(format!("{match_id}-log"), match_id))
    }
}

fn find_action(mon: &Arthropod, id: &str) -> Result<&'static Action> {
    mon.ensure_actions()?;
    mon.actions
        .iter()
        .copied()
        .find(|action| action.id == id)
        .ok_or_else(|| BattleError::UnknownAction {
            species: mon.species.id.to_string(),
            action: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::species::get_species;
    use crate::replay::{reconstruct, verify_sequence};

    fn engine(seed: u64) -> BattleEngine {
        BattleEngine::new(
            get_species("stag_beetle").unwrap(),
            get_species("tarantula").unwrap(),
            BattleConfig::default(),
            None,
            seed,
        )
        .unwrap()
    }

    #[test]
    fn step_advances_one_turn() {
        let mut engine = engine(3);
        let result = engine.step("pincer_crush", "fang_bite").unwrap();
        assert_eq!(result.before.turn, 0);
        assert_eq!(result.after.turn, 1);
        assert!(!result.events.is_empty());
        assert!(result.events.iter().all(|entry| entry.turn == 1));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let mut engine = engine(3);
        let err = engine.step("megahorn", "fang_bite").unwrap_err();
        assert_eq!(
            err,
            BattleError::UnknownAction {
                species: "stag_beetle".to_string(),
                action: "megahorn".to_string(),
            }
        );
        assert_eq!(engine.state().turn, 0);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut first = engine(11);
        let mut second = engine(11);
        while !first.is_terminal() {
            let a = first.step("pincer_crush", "fang_bite").unwrap();
            let b = second.step("pincer_crush", "fang_bite").unwrap();
            assert_eq!(a.after, b.after);
        }
        assert!(second.is_terminal());
        let terminal = first.step("pincer_crush", "fang_bite").unwrap();
        assert!(terminal.events.is_empty());
        assert!(terminal.outcome.is_some());
    }

    #[test]
    fn recorded_steps_replay() {
        let mut engine = engine(5).with_recorder();
        for _ in 0..3 {
            engine.step("quick_snip", "hair_flick").unwrap();
        }
        let hp = engine.state().remaining_hp();
        let log = engine.into_match_log("m-1").unwrap();
        assert!(verify_sequence(&log).is_ok());
        let snapshot = reconstruct(&log);
        assert_eq!(snapshot.side_a.current_hp, hp.a);
        assert_eq!(snapshot.side_b.current_hp, hp.b);
    }

    #[test]
    fn legal_actions_follow_species_table() {
        let engine = engine(1);
        assert_eq!(
            engine.legal_actions(Side::B),
            vec!["fang_bite", "web_trap", "hair_flick", "flee"]
        );
    }
}
