use super::actions::{
    get_action, resolve_actions, ActionCategory, ActionEffect, EffectTarget, ACTIONS,
};
use super::species::{get_species, ARTHROPODS, SPECIES_LIST};
use super::types::{BattleMode, BehaviorStyle, Stat, Status, WeaponType};

#[test]
fn rhinoceros_beetle_stats() {
    let beetle = get_species("rhinoceros_beetle").expect("rhinoceros beetle should exist");
    assert_eq!(beetle.base_stats.hp, 95);
    assert_eq!(beetle.base_stats.attack, 130);
    assert_eq!(beetle.style, BehaviorStyle::Grappler);
    assert_eq!(beetle.weapon.kind, WeaponType::Horn);
    assert!(!beetle.weapon.venomous);
}

#[test]
fn venomous_flag_follows_potency() {
    let stalker = get_species("deathstalker").expect("deathstalker should exist");
    assert!(stalker.weapon.venomous);
    assert_eq!(stalker.weapon.venom_potency, 95);
}

#[test]
fn every_species_action_resolves() {
    for species in ARTHROPODS.values() {
        let resolved = resolve_actions(species.actions);
        assert_eq!(
            resolved.len(),
            species.actions.len(),
            "{} references an unknown action",
            species.id
        );
    }
}

#[test]
fn action_ids_match_keys() {
    for (key, action) in ACTIONS.entries() {
        assert_eq!(*key, action.id);
    }
    for (key, species) in ARTHROPODS.entries() {
        assert_eq!(*key, species.id);
    }
}

#[test]
fn unknown_action_ids_are_dropped() {
    let resolved = resolve_actions(&["grapple", "does_not_exist", "brace"]);
    let ids: Vec<&str> = resolved.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["grapple", "brace"]);
}

#[test]
fn grapple_binds_the_opponent() {
    let grapple = get_action("grapple").expect("grapple must be present");
    assert_eq!(grapple.power, 60);
    assert_eq!(grapple.category, ActionCategory::Attack);
    assert!(grapple.inflicts(Status::Bind));
    assert!(!grapple.inflicts(Status::Poison));
}

#[test]
fn shell_guard_raises_own_defense() {
    let guard = get_action("shell_guard").expect("shell_guard must be present");
    assert_eq!(
        guard.effect,
        Some(ActionEffect::StatChange {
            target: EffectTarget::User,
            stat: Stat::Defense,
            stages: 2,
        })
    );
    assert!(!guard.is_damaging());
}

#[test]
fn stances_carry_their_mode() {
    assert_eq!(get_action("flee").and_then(|a| a.mode), Some(BattleMode::Flee));
    assert_eq!(get_action("brace").and_then(|a| a.mode), Some(BattleMode::Brace));
    assert_eq!(get_action("horn_lift").and_then(|a| a.mode), None);
}

#[test]
fn species_list_is_sorted_by_id() {
    assert_eq!(SPECIES_LIST.len(), ARTHROPODS.len());
    assert!(SPECIES_LIST.windows(2).all(|w| w[0].id < w[1].id));
}
