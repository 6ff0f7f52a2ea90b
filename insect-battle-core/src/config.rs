//! Battle configuration and balance constants.

use serde::{Deserialize, Serialize};

/// How a species' max HP is derived from its base HP stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HpFormula {
    /// `2 * base + 110`.
    Scaled,
    /// Base HP is used as max HP directly.
    Raw,
}

impl HpFormula {
    pub fn max_hp(self, base_hp: u16) -> u16 {
        match self {
            HpFormula::Scaled => base_hp.saturating_mul(2).saturating_add(110),
            HpFormula::Raw => base_hp.max(1),
        }
    }
}

/// Which attribute breaks a priority tie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Initiative {
    #[default]
    Speed,
    Aggression,
}

/// Optional rule modules layered on the core state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub environment: bool,
    pub battle_modes: bool,
    pub stat_stages: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            environment: true,
            battle_modes: true,
            stat_stages: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConstants {
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub jitter_min: f64,
    pub accuracy_floor: f64,
    pub accuracy_ceiling: f64,
    pub paralysis_block_chance: f64,
    pub bind_escape_chance: f64,
    pub flee_evasion_bonus: f64,
    pub hp_formula: HpFormula,
}

impl Default for BalanceConstants {
    fn default() -> Self {
        Self {
            crit_chance: 0.0625,
            crit_multiplier: 1.5,
            jitter_min: 0.85,
            accuracy_floor: 10.0,
            accuracy_ceiling: 95.0,
            paralysis_block_chance: 0.25,
            bind_escape_chance: 0.5,
            flee_evasion_bonus: 50.0,
            hp_formula: HpFormula::Scaled,
        }
    }
}

impl BalanceConstants {
    /// Tuning used by the style-matchup ruleset: a flatter 10% crit rate.
    pub fn arthropod() -> Self {
        Self {
            crit_chance: 0.10,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub max_turns: u32,
    pub capabilities: Capabilities,
    pub initiative: Initiative,
    pub balance: BalanceConstants,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_turns: 100,
            capabilities: Capabilities::default(),
            initiative: Initiative::Speed,
            balance: BalanceConstants::default(),
        }
    }
}

impl BattleConfig {
    /// Core rules only: no environment, no stances, stage multipliers ignored.
    pub fn classic() -> Self {
        Self {
            capabilities: Capabilities {
                environment: false,
                battle_modes: false,
                stat_stages: false,
            },
            ..Self::default()
        }
    }

    /// Looks up a named preset: `default`, `classic` or `arthropod`.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "classic" => Some(Self::classic()),
            "arthropod" => Some(Self {
                balance: BalanceConstants::arthropod(),
                ..Self::default()
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_hp_formula() {
        assert_eq!(HpFormula::Scaled.max_hp(45), 200);
        assert_eq!(HpFormula::Scaled.max_hp(20), 150);
        assert_eq!(HpFormula::Raw.max_hp(0), 1);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: BattleConfig =
            serde_json::from_str(r#"{"max_turns": 40, "balance": {"crit_chance": 0.1}}"#)
                .expect("config should parse");
        assert_eq!(config.max_turns, 40);
        assert_eq!(config.balance.crit_chance, 0.1);
        assert_eq!(config.balance.crit_multiplier, 1.5);
        assert!(config.capabilities.battle_modes);
    }

    #[test]
    fn classic_disables_modules() {
        let classic = BattleConfig::classic();
        assert!(!classic.capabilities.environment);
        assert_eq!(classic.balance, BalanceConstants::default());
    }

    #[test]
    fn named_presets() {
        let arthropod = BattleConfig::preset("arthropod").unwrap();
        assert_eq!(arthropod.balance.crit_chance, 0.10);
        assert_eq!(arthropod.balance.hp_formula, HpFormula::Scaled);
        assert!(arthropod.capabilities.stat_stages);
        assert_eq!(BattleConfig::preset("classic"), Some(BattleConfig::classic()));
        assert_eq!(BattleConfig::preset("default"), Some(BattleConfig::default()));
        assert_eq!(BattleConfig::preset("gen9"), None);
    }
}
