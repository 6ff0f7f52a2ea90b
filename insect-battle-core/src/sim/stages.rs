use crate::data::types::Stat;
use crate::sim::arthropod::Arthropod;
use serde::{Deserialize, Serialize};

pub const MAX_STAGE: i8 = 6;
pub const MIN_STAGE: i8 = -6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages {
    pub strength: i8,
    pub defense: i8,
    pub evasion: i8,
    pub speed: i8,
}

impl StatStages {
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Defense => self.defense,
            Stat::Evasion => self.evasion,
            Stat::Speed => self.speed,
        }
    }

    /// Overwrites a stage, clamped to the legal range.
    pub fn set(&mut self, stat: Stat, value: i8) {
        *self.slot(stat) = value.clamp(MIN_STAGE, MAX_STAGE);
    }

    fn slot(&mut self, stat: Stat) -> &mut i8 {
        match stat {
            Stat::Strength => &mut self.strength,
            Stat::Defense => &mut self.defense,
            Stat::Evasion => &mut self.evasion,
            Stat::Speed => &mut self.speed,
        }
    }
}

/// `(2 + s) / 2` for non-negative stages, `2 / (2 - s)` below zero.
pub fn stage_multiplier(stage: i8) -> f64 {
    let stage = f64::from(stage.clamp(MIN_STAGE, MAX_STAGE));
    if stage >= 0.0 {
        (2.0 + stage) / 2.0
    } else {
        2.0 / (2.0 - stage)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageChange {
    pub stat: Stat,
    pub new_stage: i8,
    pub changed: bool,
    pub message: String,
}

/// Shifts a stage by `delta`, clamped to [-6, 6]. A change swallowed
/// entirely by the clamp is rejected with a "won't go any further" message.
pub fn change_stage(target: &mut Arthropod, stat: Stat, delta: i8) -> StageChange {
    let name = target.name();
    let slot = target.stages.slot(stat);
    let current = *slot;
    let next = current.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
    if next == current {
        let direction = if delta >= 0 { "higher" } else { "lower" };
        return StageChange {
            stat,
            new_stage: current,
            changed: false,
            message: format!("{name}'s {} won't go any {direction}!", stat.as_str()),
        };
    }
    *slot = next;
    let verb = if delta > 0 { "rose" } else { "fell" };
    let degree = if delta.unsigned_abs() >= 2 { " sharply" } else { "" };
    StageChange {
        stat,
        new_stage: next,
        changed: true,
        message: format!("{name}'s {} {verb}{degree}!", stat.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HpFormula;
    use proptest::prelude::*;

    fn beetle() -> Arthropod {
        Arthropod::from_id("stag_beetle", HpFormula::Scaled).unwrap()
    }

    #[test]
    fn multiplier_endpoints() {
        assert_eq!(stage_multiplier(0), 1.0);
        assert_eq!(stage_multiplier(6), 4.0);
        assert_eq!(stage_multiplier(-6), 0.25);
        assert_eq!(stage_multiplier(1), 1.5);
        assert!((stage_multiplier(-1) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn capped_change_is_rejected_with_message() {
        let mut mon = beetle();
        mon.stages.defense = 5;
        let first = change_stage(&mut mon, Stat::Defense, 2);
        assert!(first.changed);
        assert_eq!(first.new_stage, 6);
        let second = change_stage(&mut mon, Stat::Defense, 1);
        assert!(!second.changed);
        assert_eq!(second.message, "Stag Beetle's defense won't go any higher!");
        assert_eq!(mon.stages.defense, 6);
    }

    #[test]
    fn sharp_drop_message() {
        let mut mon = beetle();
        let change = change_stage(&mut mon, Stat::Speed, -2);
        assert_eq!(change.message, "Stag Beetle's speed fell sharply!");
        assert_eq!(mon.stages.speed, -2);
    }

    proptest! {
        #[test]
        fn stages_never_leave_bounds(
            deltas in prop::collection::vec((0usize..4, -12i8..=12), 0..64)
        ) {
            let stats = [Stat::Strength, Stat::Defense, Stat::Evasion, Stat::Speed];
            let mut mon = beetle();
            for (idx, delta) in deltas {
                change_stage(&mut mon, stats[idx], delta);
                for stat in stats {
                    let stage = mon.stages.get(stat);
                    prop_assert!((MIN_STAGE..=MAX_STAGE).contains(&stage));
                }
            }
        }
    }
}
