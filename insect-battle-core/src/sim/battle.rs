use crate::config::BattleConfig;
use crate::data::actions::{Action, ActionEffect, EffectTarget};
use crate::data::types::{BattleMode, Status};
use crate::recorder::{BattleRecorder, RecordedEvent};
use crate::sim::accuracy::check_accuracy;
use crate::sim::arthropod::Arthropod;
use crate::sim::damage::{calculate_damage, Effectiveness};
use crate::sim::environment::Environment;
use crate::sim::mode::{apply_mode, can_attack, mode_entered_message, tick_mode};
use crate::sim::order::determine_first_actor;
use crate::sim::stages::change_stage;
use crate::sim::status::{check_can_move, process_end_of_turn_status, status_applied_message};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleStatus {
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleResult {
    SideAWins,
    SideBWins,
    Draw,
}

impl BattleResult {
    pub fn win_for(side: Side) -> Self {
        match side {
            Side::A => BattleResult::SideAWins,
            Side::B => BattleResult::SideBWins,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RemainingHp {
    pub a: u16,
    pub b: u16,
}

/// One narrated event of the battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleLogEntry {
    pub turn: u32,
    pub actor: Option<Side>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effectiveness: Option<Effectiveness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_hp: Option<RemainingHp>,
}

impl BattleLogEntry {
    pub fn text(turn: u32, actor: Option<Side>, text: impl Into<String>) -> Self {
        Self {
            turn,
            actor,
            text: text.into(),
            action_id: None,
            damage: None,
            critical: None,
            effectiveness: None,
            remaining_hp: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BattleState {
    pub turn: u32,
    pub arthropod_a: Arthropod,
    pub arthropod_b: Arthropod,
    pub environment: Option<Environment>,
    pub log: Vec<BattleLogEntry>,
    pub status: BattleStatus,
    pub winner: Option<BattleResult>,
}

impl BattleState {
    pub fn new(
        arthropod_a: Arthropod,
        arthropod_b: Arthropod,
        environment: Option<Environment>,
    ) -> Self {
        Self {
            turn: 0,
            arthropod_a,
            arthropod_b,
            environment,
            log: Vec::new(),
            status: BattleStatus::Running,
            winner: None,
        }
    }

    pub fn side(&self, side: Side) -> &Arthropod {
        match side {
            Side::A => &self.arthropod_a,
            Side::B => &self.arthropod_b,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut Arthropod {
        match side {
            Side::A => &mut self.arthropod_a,
            Side::B => &mut self.arthropod_b,
        }
    }

    /// `(actor, opponent)` borrowed mutably at once.
    fn pair_mut(&mut self, side: Side) -> (&mut Arthropod, &mut Arthropod) {
        match side {
            Side::A => (&mut self.arthropod_a, &mut self.arthropod_b),
            Side::B => (&mut self.arthropod_b, &mut self.arthropod_a),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == BattleStatus::Finished
    }

    pub fn remaining_hp(&self) -> RemainingHp {
        RemainingHp {
            a: self.arthropod_a.current_hp,
            b: self.arthropod_b.current_hp,
        }
    }

    pub fn finish(&mut self, result: BattleResult) {
        self.status = BattleStatus::Finished;
        self.winner = Some(result);
    }
}

/// Resolves one turn and returns the next state. `state` is left untouched;
/// a finished battle is returned unchanged.
pub fn execute_turn<R: Rng + ?Sized>(
    state: &BattleState,
    action_a: &Action,
    action_b: &Action,
    config: &BattleConfig,
    rng: &mut R,
) -> BattleState {
    execute_turn_recorded(state, action_a, action_b, config, rng, None)
}

pub fn execute_turn_recorded<R: Rng + ?Sized>(
    state: &BattleState,
    action_a: &Action,
    action_b: &Action,
    config: &BattleConfig,
    rng: &mut R,
    recorder: Option<&mut BattleRecorder>,
) -> BattleState {
    if state.is_finished() {
        return state.clone();
    }
    let runner = TurnRunner {
        state: state.clone(),
        config,
        rng,
        recorder,
    };
    runner.run(action_a, action_b)
}

struct TurnRunner<'a, R: Rng + ?Sized> {
    state: BattleState,
    config: &'a BattleConfig,
    rng: &'a mut R,
    recorder: Option<&'a mut BattleRecorder>,
}

impl<'a, R: Rng + ?Sized> TurnRunner<'a, R> {
    fn run(mut self, action_a: &Action, action_b: &Action) -> BattleState {
        self.state.turn += 1;
        debug!(
            turn = self.state.turn,
            hp_a = self.state.arthropod_a.current_hp,
            hp_b = self.state.arthropod_b.current_hp,
            "turn start"
        );
        self.record(None, RecordedEvent::TurnStart);
        self.record(
            Some(Side::A),
            RecordedEvent::MoveSelect {
                action_id: action_a.id.to_string(),
            },
        );
        self.record(
            Some(Side::B),
            RecordedEvent::MoveSelect {
                action_id: action_b.id.to_string(),
            },
        );

        let order = determine_first_actor(
            &self.state.arthropod_a,
            &self.state.arthropod_b,
            action_a,
            action_b,
            self.config,
            &mut *self.rng,
        );
        self.record(
            None,
            RecordedEvent::TurnOrder {
                first: order.first,
                tie_roll: order.tie_roll,
            },
        );
        let queue = match order.first {
            Side::A => [(Side::A, action_a), (Side::B, action_b)],
            Side::B => [(Side::B, action_b), (Side::A, action_a)],
        };
        for (side, action) in queue {
            if self.state.is_finished() {
                break;
            }
            self.act(side, action);
        }

        if !self.state.is_finished() {
            self.end_of_turn();
        }
        self.record_snapshot(None, RecordedEvent::TurnEnd);
        self.state
    }

    fn act(&mut self, side: Side, action: &Action) {
        if self.state.side(side).is_fainted() {
            return;
        }
        let balance = self.config.balance;
        let gated = self
            .state
            .side(side)
            .status
            .filter(|s| matches!(s, Status::Paralysis | Status::Sleep | Status::Bind));
        let check = check_can_move(self.state.side_mut(side), &balance, &mut *self.rng);
        if let Some(condition) = gated {
            let remaining_turns = self.state.side(side).status_turns;
            self.record_snapshot(
                Some(side),
                RecordedEvent::MovementCheck {
                    condition,
                    can_move: check.can_move,
                    remaining_turns,
                    cleared: check.cleared.is_some(),
                    roll: check.roll,
                },
            );
        }
        if let Some(message) = check.message {
            self.narrate(Some(side), message);
        }
        if !check.can_move {
            return;
        }

        let name = self.state.side(side).name();
        if let Some(mode) = action.mode {
            self.enter_mode(side, action, mode);
            return;
        }
        if self.config.capabilities.battle_modes && !can_attack(self.state.side(side)) {
            self.narrate(Some(side), format!("{name} is bracing and can't attack!"));
            self.record(
                Some(side),
                RecordedEvent::ActionSkipped {
                    reason: "braced".to_string(),
                },
            );
            return;
        }

        let accuracy = check_accuracy(
            action,
            self.state.side(side.opponent()),
            self.config,
            &mut *self.rng,
        );
        trace!(action = action.id, ?accuracy, "accuracy check");
        self.record(
            Some(side),
            RecordedEvent::MoveExecute {
                action_id: action.id.to_string(),
                hit: accuracy.hit,
                chance: accuracy.chance,
                roll: accuracy.roll,
            },
        );
        if !accuracy.hit {
            let text = format!("{name} used {}, but it missed!", action.name);
            let mut entry = self.entry(Some(side), text);
            entry.action_id = Some(action.id.to_string());
            self.state.log.push(entry);
            return;
        }

        let mut entry = self.entry(Some(side), format!("{name} used {}!", action.name));
        entry.action_id = Some(action.id.to_string());
        if action.is_damaging() {
            let environment = self.state.environment;
            let (attacker, defender) = self.state.pair_mut(side);
            let result = calculate_damage(
                attacker,
                defender,
                action,
                environment.as_ref(),
                self.config,
                &mut *self.rng,
            );
            defender.take_damage(result.damage);
            entry.text.push_str(&format!(" {} damage.", result.damage));
            if result.critical {
                entry.text.push_str(" A critical hit!");
            }
            match result.effectiveness {
                Effectiveness::Super => entry.text.push_str(" It's super effective!"),
                Effectiveness::NotVery => entry.text.push_str(" It's not very effective..."),
                Effectiveness::Normal => {}
            }
            entry.damage = Some(result.damage);
            entry.critical = Some(result.critical);
            entry.effectiveness = Some(result.effectiveness);
            if let Some(factors) = result.factors {
                self.record_snapshot(
                    Some(side),
                    RecordedEvent::DamageDealt {
                        action_id: action.id.to_string(),
                        target: side.opponent(),
                        damage: result.damage,
                        critical: result.critical,
                        effectiveness: result.effectiveness,
                        factors,
                    },
                );
            }
        }
        if let Some(effect) = action.effect {
            if let Some(suffix) = self.apply_effect(side, action, effect) {
                entry.text.push(' ');
                entry.text.push_str(&suffix);
            }
        }
        entry.remaining_hp = Some(self.state.remaining_hp());
        self.state.log.push(entry);

        if self.state.side(side.opponent()).is_fainted() {
            self.faint(side.opponent());
        }
    }

    fn enter_mode(&mut self, side: Side, action: &Action, mode: BattleMode) {
        let name = self.state.side(side).name();
        if !self.config.capabilities.battle_modes {
            self.narrate(Some(side), format!("{name} used {}, but nothing happened!", action.name));
            return;
        }
        if apply_mode(self.state.side_mut(side), mode) {
            let duration = self.state.side(side).mode_turns;
            self.record_snapshot(Some(side), RecordedEvent::ModeEntered { mode, duration });
            self.narrate(Some(side), mode_entered_message(name, mode));
        } else {
            self.narrate(Some(side), format!("{name} used {}, but it failed!", action.name));
        }
    }

    /// Applies a secondary effect and returns the text appended to the
    /// action's log line.
    fn apply_effect(
        &mut self,
        side: Side,
        action: &Action,
        effect: ActionEffect,
    ) -> Option<String> {
        let target_side = |target: EffectTarget| match target {
            EffectTarget::User => side,
            EffectTarget::Opponent => side.opponent(),
        };
        match effect {
            ActionEffect::StatChange { target, stat, stages } => {
                let target = target_side(target);
                if self.state.side(target).is_fainted() {
                    return None;
                }
                let change = change_stage(self.state.side_mut(target), stat, stages);
                if change.changed {
                    self.record_snapshot(
                        Some(side),
                        RecordedEvent::StatChanged {
                            target,
                            stat,
                            stages,
                            new_value: change.new_stage,
                        },
                    );
                }
                Some(change.message)
            }
            ActionEffect::StatusCondition { target, condition } => {
                let target = target_side(target);
                if self.state.side(target).is_fainted() {
                    return None;
                }
                let mon = self.state.side_mut(target);
                if mon.apply_status(condition, &mut *self.rng) {
                    let duration = mon.status_turns;
                    let message = status_applied_message(mon.name(), condition);
                    self.record_snapshot(
                        Some(side),
                        RecordedEvent::StatusApplied {
                            target,
                            condition,
                            duration,
                        },
                    );
                    Some(message)
                } else if action.is_damaging() {
                    None
                } else {
                    Some("But it failed!".to_string())
                }
            }
            ActionEffect::Heal { percent } => {
                let mon = self.state.side_mut(side);
                let amount = (u32::from(mon.max_hp) * u32::from(percent) / 100) as u16;
                let healed = mon.heal(amount);
                let name = mon.name();
                if healed == 0 {
                    return Some(format!("{name}'s HP is already full!"));
                }
                self.record_snapshot(Some(side), RecordedEvent::Healed { amount: healed });
                Some(format!("{name} recovered {healed} HP!"))
            }
            ActionEffect::ForceSwitch => {
                let foe = self.state.side(side.opponent());
                if foe.is_fainted() {
                    return None;
                }
                Some(format!("But {} has nothing to switch in!", foe.name()))
            }
        }
    }

    fn end_of_turn(&mut self) {
        for side in [Side::A, Side::B] {
            if self.state.side(side).is_fainted() {
                continue;
            }
            if let Some(tick) = process_end_of_turn_status(self.state.side_mut(side)) {
                self.record_snapshot(
                    Some(side),
                    RecordedEvent::StatusDamage {
                        condition: tick.status,
                        damage: tick.damage,
                    },
                );
                let mut entry = self.entry(Some(side), tick.message);
                entry.damage = Some(tick.damage);
                entry.remaining_hp = Some(self.state.remaining_hp());
                self.state.log.push(entry);
                if self.state.side(side).is_fainted() {
                    self.faint(side);
                    return;
                }
            }
            if !self.config.capabilities.battle_modes {
                continue;
            }
            if let Some(mode) = self.state.side(side).mode {
                let expired = tick_mode(self.state.side_mut(side));
                let remaining = self.state.side(side).mode_turns;
                self.record_snapshot(Some(side), RecordedEvent::ModeCountdown { mode, remaining });
                if let Some((_, message)) = expired {
                    self.narrate(Some(side), message);
                }
            }
        }
    }

    fn faint(&mut self, side: Side) {
        let name = self.state.side(side).name();
        self.state.finish(BattleResult::win_for(side.opponent()));
        self.narrate(Some(side), format!("{name} fainted!"));
        self.record_snapshot(Some(side), RecordedEvent::Faint { final_hp: 0 });
        debug!(turn = self.state.turn, loser = ?side, "faint");
    }

    fn entry(&self, actor: Option<Side>, text: String) -> BattleLogEntry {
        BattleLogEntry::text(self.state.turn, actor, text)
    }

    fn narrate(&mut self, actor: Option<Side>, text: String) {
        let entry = self.entry(actor, text);
        self.state.log.push(entry);
    }

    fn record(&mut self, actor: Option<Side>, event: RecordedEvent) {
        if let Some(recorder) = self.recorder.as_deref_mut() {
            recorder.record(self.state.turn, actor, event);
        }
    }

    fn record_snapshot(&mut self, actor: Option<Side>, event: RecordedEvent) {
        if let Some(recorder) = self.recorder.as_deref_mut() {
            recorder.record_with_snapshot(self.state.turn, actor, event, &self.state);
        }
    }
}
