use serde::{Deserialize, Serialize};

/// Behavioral archetype used by the cyclic style matchup.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorStyle {
    Grappler,
    Striker,
    Venomous,
    Defensive,
}

impl BehaviorStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorStyle::Grappler => "grappler",
            BehaviorStyle::Striker => "striker",
            BehaviorStyle::Venomous => "venomous",
            BehaviorStyle::Defensive => "defensive",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    Horn,
    Mandible,
    Stinger,
    Fang,
    Foreleg,
    Leg,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Forest,
    Desert,
    Wetland,
    Cave,
}

impl Terrain {
    pub const ALL: [Terrain; 4] = [
        Terrain::Forest,
        Terrain::Desert,
        Terrain::Wetland,
        Terrain::Cave,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::Forest => "forest",
            Terrain::Desert => "desert",
            Terrain::Wetland => "wetland",
            Terrain::Cave => "cave",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
}

/// Preferred activity window of a species; `Both` matches any time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredTime {
    Day,
    Night,
    Both,
}

impl PreferredTime {
    pub fn matches(self, time: TimeOfDay) -> bool {
        matches!(
            (self, time),
            (PreferredTime::Both, _)
                | (PreferredTime::Day, TimeOfDay::Day)
                | (PreferredTime::Night, TimeOfDay::Night)
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    Rain,
    Sunny,
    Sandstorm,
}

impl Weather {
    pub const ALL: [Weather; 4] = [
        Weather::Clear,
        Weather::Rain,
        Weather::Sunny,
        Weather::Sandstorm,
    ];
}

/// Stats that carry a battle stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Strength,
    Defense,
    Evasion,
    Speed,
}

impl Stat {
    pub fn as_str(self) -> &'static str {
        match self {
            Stat::Strength => "strength",
            Stat::Defense => "defense",
            Stat::Evasion => "evasion",
            Stat::Speed => "speed",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Poison,
    Paralysis,
    Sleep,
    Burn,
    Bind,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Poison => "poison",
            Status::Paralysis => "paralysis",
            Status::Sleep => "sleep",
            Status::Burn => "burn",
            Status::Bind => "bind",
        }
    }
}

/// Transient self-imposed stance.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleMode {
    Flee,
    Brace,
}

impl BattleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BattleMode::Flee => "flee",
            BattleMode::Brace => "brace",
        }
    }
}

pub const ARMOR_HARD_THRESHOLD: u8 = 60;

/// Attack multiplier of `attacker` style against `defender` style.
pub fn style_matchup(attacker: BehaviorStyle, defender: BehaviorStyle) -> f64 {
    use BehaviorStyle::*;
    match (attacker, defender) {
        (Grappler, Striker) | (Striker, Venomous) | (Venomous, Grappler) => 1.2,
        (Grappler, Venomous) | (Striker, Grappler) | (Venomous, Striker) => 0.8,
        _ => 1.0,
    }
}

/// Bonus from the attacker/defender weight ratio, bounded to [0.7, 1.3].
pub fn weight_bonus(attacker_weight_g: f64, defender_weight_g: f64) -> f64 {
    if defender_weight_g <= 0.0 {
        return 1.3;
    }
    let ratio = attacker_weight_g / defender_weight_g;
    if ratio >= 2.0 {
        1.3
    } else if ratio <= 0.5 {
        0.7
    } else if ratio >= 1.0 {
        1.0 + (ratio - 1.0) * 0.3
    } else {
        1.0 - (1.0 - ratio) * 0.6
    }
}

/// Weapon effectiveness split on soft (< 60) and hard armor.
pub fn weapon_vs_armor(weapon: WeaponType, armor_rating: u8) -> f64 {
    let (soft, hard) = match weapon {
        WeaponType::Horn => (1.1, 0.9),
        WeaponType::Mandible => (1.0, 1.0),
        WeaponType::Stinger => (1.3, 0.7),
        WeaponType::Fang => (1.2, 0.8),
        WeaponType::Foreleg => (1.1, 0.85),
        WeaponType::Leg => (1.0, 0.95),
    };
    if armor_rating < ARMOR_HARD_THRESHOLD {
        soft
    } else {
        hard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_cycle_is_symmetric() {
        use BehaviorStyle::*;
        for (a, b) in [(Grappler, Striker), (Striker, Venomous), (Venomous, Grappler)] {
            assert_eq!(style_matchup(a, b), 1.2);
            assert_eq!(style_matchup(b, a), 0.8);
        }
        for style in [Grappler, Striker, Venomous] {
            assert_eq!(style_matchup(Defensive, style), 1.0);
            assert_eq!(style_matchup(style, Defensive), 1.0);
            assert_eq!(style_matchup(style, style), 1.0);
        }
    }

    #[test]
    fn weight_bonus_clamps_and_interpolates() {
        assert_eq!(weight_bonus(30.0, 10.0), 1.3);
        assert_eq!(weight_bonus(2.0, 10.0), 0.7);
        assert_eq!(weight_bonus(10.0, 10.0), 1.0);
        assert!((weight_bonus(15.0, 10.0) - 1.15).abs() < 1e-9);
        assert!((weight_bonus(7.5, 10.0) - 0.85).abs() < 1e-9);
    }

    #[test]
    fn armor_threshold_switches_branch() {
        assert_eq!(weapon_vs_armor(WeaponType::Stinger, 59), 1.3);
        assert_eq!(weapon_vs_armor(WeaponType::Stinger, 60), 0.7);
        assert_eq!(weapon_vs_armor(WeaponType::Mandible, 95), 1.0);
    }

    #[test]
    fn preferred_time_both_matches_anything() {
        assert!(PreferredTime::Both.matches(TimeOfDay::Night));
        assert!(PreferredTime::Day.matches(TimeOfDay::Day));
        assert!(!PreferredTime::Night.matches(TimeOfDay::Day));
    }
}
