use crate::config::BalanceConstants;
use crate::data::types::BattleMode;
use crate::sim::arthropod::Arthropod;

pub const FLEE_TURNS: u8 = 2;
pub const BRACE_TURNS: u8 = 3;
pub const FLEE_ATTACK_PENALTY: f64 = 0.5;
pub const BRACE_DAMAGE_REDUCTION: f64 = 0.5;

fn duration(mode: BattleMode) -> u8 {
    match mode {
        BattleMode::Flee => FLEE_TURNS,
        BattleMode::Brace => BRACE_TURNS,
    }
}

/// Enters `mode` if no mode is active.
pub fn apply_mode(mon: &mut Arthropod, mode: BattleMode) -> bool {
    if mon.mode.is_some() {
        return false;
    }
    mon.mode = Some(mode);
    mon.mode_turns = duration(mode);
    true
}

pub fn mode_entered_message(name: &str, mode: BattleMode) -> String {
    match mode {
        BattleMode::Flee => format!("{name} scrambles away, ready to dodge!"),
        BattleMode::Brace => format!("{name} braces itself!"),
    }
}

/// Braced combatants may not attack.
pub fn can_attack(mon: &Arthropod) -> bool {
    mon.mode != Some(BattleMode::Brace)
}

/// Percentage points subtracted from an attacker's hit chance.
pub fn evasion_bonus(defender: &Arthropod, balance: &BalanceConstants) -> f64 {
    if defender.mode == Some(BattleMode::Flee) {
        balance.flee_evasion_bonus
    } else {
        0.0
    }
}

/// Combined outgoing penalty and incoming reduction for one hit.
pub fn mode_damage_factor(attacker: &Arthropod, defender: &Arthropod) -> f64 {
    let penalty = if attacker.mode == Some(BattleMode::Flee) {
        FLEE_ATTACK_PENALTY
    } else {
        1.0
    };
    let reduction = if defender.mode == Some(BattleMode::Brace) {
        BRACE_DAMAGE_REDUCTION
    } else {
        1.0
    };
    penalty * reduction
}

/// Counts the active mode down; returns the expiry message when it ends.
pub fn tick_mode(mon: &mut Arthropod) -> Option<(BattleMode, String)> {
    let mode = mon.mode?;
    mon.mode_turns = mon.mode_turns.saturating_sub(1);
    if mon.mode_turns > 0 {
        return None;
    }
    mon.mode = None;
    Some((
        mode,
        format!("{}'s {} stance wore off.", mon.name(), mode.as_str()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HpFormula;

    fn mon() -> Arthropod {
        Arthropod::from_id("rhinoceros_beetle", HpFormula::Scaled).unwrap()
    }

    #[test]
    fn modes_do_not_stack() {
        let mut beetle = mon();
        assert!(apply_mode(&mut beetle, BattleMode::Brace));
        assert!(!apply_mode(&mut beetle, BattleMode::Flee));
        assert_eq!(beetle.mode_turns, BRACE_TURNS);
        assert!(!can_attack(&beetle));
    }

    #[test]
    fn flee_expires_after_two_ticks() {
        let mut beetle = mon();
        apply_mode(&mut beetle, BattleMode::Flee);
        assert!(tick_mode(&mut beetle).is_none());
        let (mode, message) = tick_mode(&mut beetle).unwrap();
        assert_eq!(mode, BattleMode::Flee);
        assert_eq!(message, "Rhinoceros Beetle's flee stance wore off.");
        assert_eq!(beetle.mode, None);
        assert!(tick_mode(&mut beetle).is_none());
    }

    #[test]
    fn damage_factor_combines_both_sides() {
        let mut attacker = mon();
        let mut defender = mon();
        assert_eq!(mode_damage_factor(&attacker, &defender), 1.0);
        apply_mode(&mut attacker, BattleMode::Flee);
        apply_mode(&mut defender, BattleMode::Brace);
        assert_eq!(mode_damage_factor(&attacker, &defender), 0.25);
        assert_eq!(evasion_bonus(&attacker, &BalanceConstants::default()), 50.0);
        assert_eq!(evasion_bonus(&defender, &BalanceConstants::default()), 0.0);
    }
}
