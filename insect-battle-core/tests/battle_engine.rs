use insect_battle_core::config::{BattleConfig, HpFormula};
use insect_battle_core::data::actions::{get_action, Action, ActionCategory};
use insect_battle_core::data::species::{get_species, BaseStats, SpeciesData, Weapon};
use insect_battle_core::data::types::{BehaviorStyle, Status, WeaponType};
use insect_battle_core::recorder::{MatchLog, RecordedEvent};
use insect_battle_core::replay::{reconstruct, verify_sequence, verify_snapshots};
use insect_battle_core::sim::arthropod::Arthropod;
use insect_battle_core::sim::battle::{execute_turn, BattleState, Side};
use insect_battle_core::sim::damage::calculate_damage;
use insect_battle_core::sim::order::determine_first_actor;
use insect_battle_core::sim::rng::ScriptedRng;
use insect_battle_core::sim::{simulate_battle_with_replay, simulate_many, SimulationOptions};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn make_species(
    id: &'static str,
    style: BehaviorStyle,
    hp: u16,
    attack: u16,
    defense: u16,
    weight_g: f64,
    weapon: WeaponType,
    armor_rating: u8,
) -> &'static SpeciesData {
    Box::leak(Box::new(SpeciesData {
        id,
        name: id,
        name_ko: id,
        style,
        base_stats: BaseStats {
            hp,
            attack,
            defense,
            speed: 50,
        },
        weight_g,
        aggression: 50,
        weapon: Weapon {
            kind: weapon,
            venomous: false,
            venom_potency: 0,
        },
        armor_rating,
        habitat: None,
        actions: &["quick_snip"],
    }))
}

fn make_action(id: &'static str, power: u16) -> Action {
    Action {
        id,
        name: id,
        name_ko: id,
        category: ActionCategory::Attack,
        power,
        accuracy: 100,
        priority: 0,
        effect: None,
        mode: None,
    }
}

#[test]
fn golden_damage_at_mid_rolls() {
    // base hp 45 -> 200 max hp, base hp 20 -> 150 max hp
    let attacker = make_species(
        "golden_attacker",
        BehaviorStyle::Defensive,
        45,
        130,
        70,
        10.0,
        WeaponType::Mandible,
        70,
    );
    let defender = make_species(
        "golden_defender",
        BehaviorStyle::Defensive,
        20,
        90,
        80,
        10.0,
        WeaponType::Mandible,
        70,
    );
    let attacker = Arthropod::new(attacker, HpFormula::Scaled);
    let defender = Arthropod::new(defender, HpFormula::Scaled);
    assert_eq!(attacker.max_hp, 200);
    assert_eq!(defender.max_hp, 150);

    let action = make_action("golden_strike", 120);
    let config = BattleConfig::default();
    for _ in 0..3 {
        let mut rng = ScriptedRng::constant(0.5);
        let result = calculate_damage(&attacker, &defender, &action, None, &config, &mut rng);
        assert_eq!(result.damage, 81);
        assert!(!result.critical);
        assert_eq!(rng.consumed(), 2);
    }
}

#[test]
fn golden_damage_with_stacked_modifiers() {
    let attacker = make_species(
        "stacked_attacker",
        BehaviorStyle::Grappler,
        45,
        130,
        70,
        20.0,
        WeaponType::Stinger,
        70,
    );
    let defender = make_species(
        "stacked_defender",
        BehaviorStyle::Striker,
        20,
        90,
        80,
        10.0,
        WeaponType::Leg,
        40,
    );
    let attacker = Arthropod::new(attacker, HpFormula::Scaled);
    let defender = Arthropod::new(defender, HpFormula::Scaled);
    let action = make_action("stacked_strike", 120);
    let mut rng = ScriptedRng::constant(0.5);
    let config = BattleConfig::default();
    let result = calculate_damage(&attacker, &defender, &action, None, &config, &mut rng);
    let factors = result.factors.unwrap();
    assert!((factors.style - 1.2).abs() < 1e-9);
    assert!((factors.weight - 1.3).abs() < 1e-9);
    assert!((factors.weapon_armor - 1.3).abs() < 1e-9);
    assert_eq!(result.damage, 164);
}

fn fresh_state(a: &str, b: &str) -> BattleState {
    BattleState::new(
        Arthropod::from_id(a, HpFormula::Scaled).unwrap(),
        Arthropod::from_id(b, HpFormula::Scaled).unwrap(),
        None,
    )
}

#[test]
fn execute_turn_is_deterministic_for_equal_draws() {
    let state = fresh_state("giant_centipede", "emperor_scorpion");
    let config = BattleConfig::default();
    let a = get_action("forcipule_bite").unwrap();
    let b = get_action("venom_strike").unwrap();
    let first = execute_turn(&state, a, b, &config, &mut SmallRng::seed_from_u64(42));
    let second = execute_turn(&state, a, b, &config, &mut SmallRng::seed_from_u64(42));
    assert_eq!(first, second);
    assert_eq!(state.turn, 0);
    assert_eq!(first.turn, 1);
}

#[test]
fn poison_drains_an_eighth_each_turn() {
    // base hp 25 -> 160 max hp
    let species = make_species(
        "poison_dummy",
        BehaviorStyle::Defensive,
        25,
        50,
        50,
        5.0,
        WeaponType::Leg,
        50,
    );
    let mut a = Arthropod::new(species, HpFormula::Scaled);
    let mut b = Arthropod::new(species, HpFormula::Scaled);
    assert_eq!(a.max_hp, 160);
    a.status = Some(Status::Poison);
    b.status = Some(Status::Poison);
    let idle = make_action("idle", 0);
    let config = BattleConfig::default();
    let mut rng = ScriptedRng::constant(0.5);

    let mut state = BattleState::new(a, b, None);
    for turn in 1..=3u16 {
        state = execute_turn(&state, &idle, &idle, &config, &mut rng);
        assert_eq!(state.arthropod_a.current_hp, 160 - 20 * turn);
        assert_eq!(state.arthropod_b.current_hp, 160 - 20 * turn);
    }
}

#[test]
fn order_is_antisymmetric() {
    let fast = Arthropod::from_id("desert_locust", HpFormula::Scaled).unwrap();
    let slow = Arthropod::from_id("hercules_beetle", HpFormula::Scaled).unwrap();
    let action = get_action("quick_snip").unwrap();
    let heavy = get_action("megahorn").unwrap();
    let config = BattleConfig::default();
    let mut rng = ScriptedRng::constant(0.5);

    let forward = determine_first_actor(&fast, &slow, heavy, heavy, &config, &mut rng);
    let reverse = determine_first_actor(&slow, &fast, heavy, heavy, &config, &mut rng);
    assert_eq!(forward.first, Side::A);
    assert_eq!(reverse.first, Side::B);

    let forward = determine_first_actor(&slow, &fast, action, heavy, &config, &mut rng);
    let reverse = determine_first_actor(&fast, &slow, heavy, action, &config, &mut rng);
    assert_eq!(forward.first, reverse.first.opponent());
    assert_eq!(rng.consumed(), 0);
}

#[test]
fn recorded_battles_replay_to_final_hp() {
    let pairs = [
        ("rhinoceros_beetle", "praying_mantis"),
        ("jewel_wasp", "giant_water_bug"),
        ("bombardier_beetle", "deathstalker"),
    ];
    let options = SimulationOptions::default();
    for (seed, (a, b)) in pairs.into_iter().enumerate() {
        let mut rng = SmallRng::seed_from_u64(seed as u64);
        let (state, log) = simulate_battle_with_replay(
            get_species(a).unwrap(),
            get_species(b).unwrap(),
            &options,
            &mut rng,
            "match-1",
        )
        .unwrap();

        assert!(verify_sequence(&log).is_ok());
        for (index, action) in log.actions.iter().enumerate() {
            assert_eq!(action.sequence as usize, index + 1);
        }
        assert!(matches!(log.actions[0].event, RecordedEvent::TurnStart));
        verify_snapshots(&log).unwrap();

        let snapshot = reconstruct(&log);
        assert_eq!(snapshot.side_a.current_hp, state.arthropod_a.current_hp);
        assert_eq!(snapshot.side_b.current_hp, state.arthropod_b.current_hp);
        assert_eq!(snapshot.turn, state.turn);

        let round_trip = MatchLog::from_json(&log.to_json().unwrap()).unwrap();
        assert_eq!(round_trip, log);
    }
}

#[test]
fn summary_counts_every_battle() {
    let summary = simulate_many(
        get_species("stag_beetle").unwrap(),
        get_species("tarantula").unwrap(),
        1000,
        &SimulationOptions::default(),
        7,
    )
    .unwrap();
    assert_eq!(summary.a_wins + summary.b_wins + summary.draws, 1000);
    assert!((0.0..=100.0).contains(&summary.win_rate));
    assert!(summary.avg_turns >= 1.0);
    assert!(summary.avg_turns <= 100.0);
}
