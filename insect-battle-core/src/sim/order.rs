use crate::config::{BattleConfig, Initiative};
use crate::data::actions::Action;
use crate::sim::arthropod::Arthropod;
use crate::sim::battle::Side;
use crate::sim::rng::roll_unit;
use crate::sim::stages::stage_multiplier;
use crate::sim::status::paralysis_speed_multiplier;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderDecision {
    pub first: Side,
    /// Coin-flip draw, present only when priority and speed were tied.
    pub tie_roll: Option<f64>,
}

/// Initiative stat after stages and paralysis.
pub fn effective_speed(mon: &Arthropod, config: &BattleConfig) -> u32 {
    let base = match config.initiative {
        Initiative::Speed => f64::from(mon.species.base_stats.speed),
        Initiative::Aggression => f64::from(mon.species.aggression),
    };
    let stage = if config.capabilities.stat_stages {
        stage_multiplier(mon.stages.speed)
    } else {
        1.0
    };
    (base * stage * paralysis_speed_multiplier(mon)).floor() as u32
}

/// Priority, then effective speed, then a coin flip.
pub fn determine_first_actor<R: Rng + ?Sized>(
    mon_a: &Arthropod,
    mon_b: &Arthropod,
    action_a: &Action,
    action_b: &Action,
    config: &BattleConfig,
    rng: &mut R,
) -> OrderDecision {
    if action_a.priority != action_b.priority {
        let first = if action_a.priority > action_b.priority {
            Side::A
        } else {
            Side::B
        };
        return OrderDecision {
            first,
            tie_roll: None,
        };
    }
    let speed_a = effective_speed(mon_a, config);
    let speed_b = effective_speed(mon_b, config);
    if speed_a != speed_b {
        let first = if speed_a > speed_b { Side::A } else { Side::B };
        return OrderDecision {
            first,
            tie_roll: None,
        };
    }
    let roll = roll_unit(rng);
    OrderDecision {
        first: if roll < 0.5 { Side::A } else { Side::B },
        tie_roll: Some(roll),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HpFormula;
    use crate::data::actions::get_action;
    use crate::data::types::Status;
    use crate::sim::rng::ScriptedRng;

    fn mon(id: &str) -> Arthropod {
        Arthropod::from_id(id, HpFormula::Scaled).unwrap()
    }

    #[test]
    fn priority_beats_speed() {
        let slow = mon("hercules_beetle");
        let fast = mon("desert_locust");
        let thrust = get_action("horn_thrust").unwrap();
        let swarm = get_action("leg_swarm").unwrap();
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::constant(0.5);
        let order = determine_first_actor(&slow, &fast, thrust, swarm, &config, &mut rng);
        assert_eq!(order.first, Side::A);
        let order = determine_first_actor(&slow, &fast, swarm, swarm, &config, &mut rng);
        assert_eq!(order.first, Side::B);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn paralysis_halves_speed() {
        let config = BattleConfig::default();
        let mut locust = mon("desert_locust");
        assert_eq!(effective_speed(&locust, &config), 120);
        locust.status = Some(Status::Paralysis);
        assert_eq!(effective_speed(&locust, &config), 60);
        locust.stages.speed = 2;
        assert_eq!(effective_speed(&locust, &config), 120);
    }

    #[test]
    fn swapping_sides_swaps_the_winner() {
        let config = BattleConfig::default();
        let pairs = [("stag_beetle", "praying_mantis"), ("emperor_scorpion", "tarantula")];
        let action = get_action("leg_swarm").unwrap();
        for (a, b) in pairs {
            let (a, b) = (mon(a), mon(b));
            let mut rng = ScriptedRng::constant(0.5);
            let forward = determine_first_actor(&a, &b, action, action, &config, &mut rng);
            let mut rng = ScriptedRng::constant(0.5);
            let swapped = determine_first_actor(&b, &a, action, action, &config, &mut rng);
            assert_eq!(forward.first, swapped.first.opponent());
        }
    }

    #[test]
    fn full_tie_flips_a_coin() {
        let config = BattleConfig::default();
        let a = mon("stag_beetle");
        let b = mon("stag_beetle");
        let action = get_action("quick_snip").unwrap();
        let mut rng = ScriptedRng::constant(0.2);
        let heads = determine_first_actor(&a, &b, action, action, &config, &mut rng);
        let mut rng = ScriptedRng::constant(0.7);
        let tails = determine_first_actor(&a, &b, action, action, &config, &mut rng);
        assert_eq!(heads.first, Side::A);
        assert_eq!(tails.first, Side::B);
        assert_eq!(tails.tie_roll, Some(0.7));
    }

    #[test]
    fn aggression_initiative() {
        let config = BattleConfig {
            initiative: Initiative::Aggression,
            ..BattleConfig::default()
        };
        assert_eq!(effective_speed(&mon("giant_centipede"), &config), 90);
    }

    #[test]
    fn classic_rules_ignore_speed_stages() {
        let mut locust = mon("desert_locust");
        locust.stages.speed = 2;
        assert_eq!(effective_speed(&locust, &BattleConfig::classic()), 120);
        assert_eq!(effective_speed(&locust, &BattleConfig::default()), 240);
        locust.status = Some(Status::Paralysis);
        assert_eq!(effective_speed(&locust, &BattleConfig::classic()), 60);
    }
}
