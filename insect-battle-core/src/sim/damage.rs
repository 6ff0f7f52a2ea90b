use crate::config::BattleConfig;
use crate::data::actions::Action;
use crate::data::types::{style_matchup, weapon_vs_armor, weight_bonus};
use crate::sim::arthropod::Arthropod;
use crate::sim::environment::{environment_bonus, Environment};
use crate::sim::mode::mode_damage_factor;
use crate::sim::rng::roll_unit;
use crate::sim::stages::stage_multiplier;
use crate::sim::status::burn_attack_multiplier;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    Super,
    Normal,
    NotVery,
}

impl Effectiveness {
    fn from_multiplier(multiplier: f64) -> Self {
        if multiplier > 1.0 {
            Effectiveness::Super
        } else if multiplier < 1.0 {
            Effectiveness::NotVery
        } else {
            Effectiveness::Normal
        }
    }
}

/// Every input of one damage roll, in application order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageFactors {
    pub base: f64,
    pub style: f64,
    pub weight: f64,
    pub weapon_armor: f64,
    pub critical: f64,
    pub jitter: f64,
    pub environment: f64,
    pub mode: f64,
    pub stages: f64,
    pub crit_roll: f64,
    pub jitter_roll: f64,
}

impl DamageFactors {
    pub fn multiplier(&self) -> f64 {
        self.style
            * self.weight
            * self.weapon_armor
            * self.critical
            * self.jitter
            * self.environment
            * self.mode
            * self.stages
    }

    pub fn damage(&self) -> u16 {
        let raw = (self.base * self.multiplier()).floor();
        raw.clamp(1.0, f64::from(u16::MAX)) as u16
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    pub damage: u16,
    pub critical: bool,
    pub effectiveness: Effectiveness,
    /// `None` for actions that deal no damage.
    pub factors: Option<DamageFactors>,
}

impl DamageResult {
    fn none() -> Self {
        Self {
            damage: 0,
            critical: false,
            effectiveness: Effectiveness::Normal,
            factors: None,
        }
    }
}

/// Level-50 style scaling of power by the offense/defense ratio.
pub fn base_damage(power: u16, offense: f64, defense: f64) -> f64 {
    let defense = defense.max(1.0);
    (22.0 * f64::from(power) * (offense / defense)) / 50.0 + 2.0
}

/// Rolls crit then jitter and combines every modifier. Zero-power actions
/// return 0 without drawing.
pub fn calculate_damage<R: Rng + ?Sized>(
    attacker: &Arthropod,
    defender: &Arthropod,
    action: &Action,
    environment: Option<&Environment>,
    config: &BattleConfig,
    rng: &mut R,
) -> DamageResult {
    if !action.is_damaging() {
        return DamageResult::none();
    }
    let balance = &config.balance;
    let capabilities = &config.capabilities;
    let offense = (f64::from(attacker.species.base_stats.attack)
        * burn_attack_multiplier(attacker, action.category))
    .floor();
    let defense = f64::from(defender.species.base_stats.defense);

    let style = style_matchup(attacker.species.style, defender.species.style);
    let crit_roll = roll_unit(rng);
    let critical = crit_roll < balance.crit_chance;
    let jitter_roll = roll_unit(rng);
    let jitter = balance.jitter_min + jitter_roll * (1.0 - balance.jitter_min);

    let environment = match environment {
        Some(env) if capabilities.environment => {
            environment_bonus(attacker.species, env) / environment_bonus(defender.species, env)
        }
        _ => 1.0,
    };
    let mode = if capabilities.battle_modes {
        mode_damage_factor(attacker, defender)
    } else {
        1.0
    };
    let stages = if capabilities.stat_stages {
        stage_multiplier(attacker.stages.strength) / stage_multiplier(defender.stages.defense)
    } else {
        1.0
    };

    let factors = DamageFactors {
        base: base_damage(action.power, offense, defense),
        style,
        weight: weight_bonus(attacker.species.weight_g, defender.species.weight_g),
        weapon_armor: weapon_vs_armor(attacker.species.weapon.kind, defender.species.armor_rating),
        critical: if critical { balance.crit_multiplier } else { 1.0 },
        jitter,
        environment,
        mode,
        stages,
        crit_roll,
        jitter_roll,
    };
    DamageResult {
        damage: factors.damage(),
        critical,
        effectiveness: Effectiveness::from_multiplier(style),
        factors: Some(factors),
    }
}
