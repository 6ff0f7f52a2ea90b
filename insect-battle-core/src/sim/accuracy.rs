use crate::config::BattleConfig;
use crate::data::actions::Action;
use crate::sim::arthropod::Arthropod;
use crate::sim::mode::evasion_bonus;
use crate::sim::rng::roll_unit;
use crate::sim::stages::stage_multiplier;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccuracyCheck {
    pub hit: bool,
    /// Final hit chance in percent, `None` when the action cannot miss.
    pub chance: Option<f64>,
    pub roll: Option<f64>,
}

/// Hit chance in percent against `defender`, or `None` for sure hits.
pub fn hit_chance(action: &Action, defender: &Arthropod, config: &BattleConfig) -> Option<f64> {
    if action.accuracy >= 100 {
        return None;
    }
    let balance = &config.balance;
    let mut chance = f64::from(action.accuracy);
    if config.capabilities.stat_stages {
        chance /= stage_multiplier(defender.stages.evasion);
    }
    if config.capabilities.battle_modes {
        chance -= evasion_bonus(defender, balance);
    }
    Some(chance.clamp(balance.accuracy_floor, balance.accuracy_ceiling))
}

pub fn check_accuracy<R: Rng + ?Sized>(
    action: &Action,
    defender: &Arthropod,
    config: &BattleConfig,
    rng: &mut R,
) -> AccuracyCheck {
    match hit_chance(action, defender, config) {
        None => AccuracyCheck {
            hit: true,
            chance: None,
            roll: None,
        },
        Some(chance) => {
            let roll = roll_unit(rng) * 100.0;
            AccuracyCheck {
                hit: roll < chance,
                chance: Some(chance),
                roll: Some(roll),
            }
        }
    }
}
