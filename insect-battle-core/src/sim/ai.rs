use crate::data::actions::{Action, ActionCategory};
use crate::data::types::{style_matchup, BattleMode, Status};
use crate::error::Result;
use crate::sim::arthropod::Arthropod;
use crate::sim::rng::{roll_unit, weighted_index};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const BASE_SCORE: f64 = 50.0;
const LOW_HP: f64 = 0.3;
const WOUNDED_HP: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiPolicy {
    /// Weighted roulette over situational scores.
    #[default]
    Strategic,
    /// Strongest hit on a favorable matchup, otherwise a random hit.
    Legacy,
}

impl AiPolicy {
    pub fn choose_action<R: Rng + ?Sized>(
        self,
        attacker: &Arthropod,
        defender: &Arthropod,
        rng: &mut R,
    ) -> Result<&'static Action> {
        match self {
            AiPolicy::Strategic => select_action(attacker, defender, rng),
            AiPolicy::Legacy => select_legacy_action(attacker, defender, rng),
        }
    }
}

pub fn score_action(action: &Action, attacker: &Arthropod, defender: &Arthropod) -> f64 {
    let own_hp = attacker.hp_ratio();
    let foe_hp = defender.hp_ratio();
    let matchup = style_matchup(attacker.species.style, defender.species.style);
    let mut score = BASE_SCORE;

    if own_hp <= LOW_HP {
        match action.mode {
            Some(BattleMode::Flee) => score += 40.0,
            Some(BattleMode::Brace) => score += 30.0,
            None => {}
        }
    }

    if matchup < 1.0 {
        if action.category == ActionCategory::Defense {
            score += 25.0;
        }
        if action.mode.is_some() {
            score += 20.0;
        }
    } else if matchup > 1.0 && action.is_damaging() {
        score += 20.0;
        if action.power >= 80 {
            score += 15.0;
        }
    }

    if attacker.species.weapon.venomous && action.inflicts(Status::Poison) {
        if defender.status.is_none() {
            score += 30.0;
        } else {
            score -= 20.0;
        }
    }

    if action.priority > 0 && own_hp <= WOUNDED_HP {
        score += f64::from(action.priority) * 15.0;
    }

    if foe_hp <= LOW_HP && action.is_damaging() {
        score += f64::from(action.power) * 0.3;
    }

    if attacker.mode.is_some() && action.mode.is_some() {
        score = 0.0;
    }

    score.max(0.0)
}

/// Weighted pick over positively scored actions. Falls back to the first
/// action when nothing scores above zero.
pub fn select_action<R: Rng + ?Sized>(
    attacker: &Arthropod,
    defender: &Arthropod,
    rng: &mut R,
) -> Result<&'static Action> {
    attacker.ensure_actions()?;
    let scores: Vec<f64> = attacker
        .actions
        .iter()
        .map(|action| score_action(action, attacker, defender))
        .collect();
    let idx = weighted_index(rng, &scores).unwrap_or(0);
    tracing::trace!(
        species = attacker.species.id,
        action = attacker.actions[idx].id,
        ?scores,
        "ai pick"
    );
    Ok(attacker.actions[idx])
}

pub fn select_legacy_action<R: Rng + ?Sized>(
    attacker: &Arthropod,
    defender: &Arthropod,
    rng: &mut R,
) -> Result<&'static Action> {
    attacker.ensure_actions()?;
    let damaging: Vec<&'static Action> = attacker
        .actions
        .iter()
        .copied()
        .filter(|action| action.is_damaging())
        .collect();
    if damaging.is_empty() {
        return Ok(attacker.actions[0]);
    }
    if style_matchup(attacker.species.style, defender.species.style) > 1.0 {
        let strongest = damaging
            .iter()
            .copied()
            .fold(damaging[0], |best, action| {
                if action.power > best.power {
                    action
                } else {
                    best
                }
            });
        return Ok(strongest);
    }
    let idx = ((roll_unit(rng) * damaging.len() as f64) as usize).min(damaging.len() - 1);
    Ok(damaging[idx])
}
