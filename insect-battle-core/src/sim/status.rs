use crate::config::BalanceConstants;
use crate::data::actions::ActionCategory;
use crate::data::types::Status;
use crate::sim::arthropod::Arthropod;
use crate::sim::rng::{roll_between, roll_unit};
use rand::Rng;

pub const SLEEP_TURNS: (u8, u8) = (1, 3);
pub const BIND_TURNS: (u8, u8) = (2, 4);

/// Outcome of the start-of-action status gate.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveCheck {
    pub can_move: bool,
    pub message: Option<String>,
    /// Literal draw consumed by the gate, if any.
    pub roll: Option<f64>,
    /// Condition that ended during this check.
    pub cleared: Option<Status>,
}

impl MoveCheck {
    fn free() -> Self {
        Self {
            can_move: true,
            message: None,
            roll: None,
            cleared: None,
        }
    }
}

/// End-of-turn damage dealt by a condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusTick {
    pub status: Status,
    pub damage: u16,
    pub message: String,
}

impl Arthropod {
    /// Sets `status` if none is active. Sleep and bind roll their duration.
    pub fn apply_status<R: Rng + ?Sized>(&mut self, status: Status, rng: &mut R) -> bool {
        if self.status.is_some() {
            return false;
        }
        self.status_turns = match status {
            Status::Sleep => roll_between(rng, SLEEP_TURNS.0, SLEEP_TURNS.1),
            Status::Bind => roll_between(rng, BIND_TURNS.0, BIND_TURNS.1),
            _ => 0,
        };
        self.status = Some(status);
        true
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.status_turns = 0;
    }
}

pub fn status_applied_message(name: &str, status: Status) -> String {
    match status {
        Status::Poison => format!("{name} was poisoned!"),
        Status::Paralysis => format!("{name} is paralyzed! It may be unable to move!"),
        Status::Sleep => format!("{name} fell asleep!"),
        Status::Burn => format!("{name} was burned!"),
        Status::Bind => format!("{name} was bound tight!"),
    }
}

pub fn check_can_move<R: Rng + ?Sized>(
    mon: &mut Arthropod,
    balance: &BalanceConstants,
    rng: &mut R,
) -> MoveCheck {
    let name = mon.name();
    match mon.status {
        None | Some(Status::Poison) | Some(Status::Burn) => MoveCheck::free(),
        Some(Status::Paralysis) => {
            let roll = roll_unit(rng);
            if roll < balance.paralysis_block_chance {
                MoveCheck {
                    can_move: false,
                    message: Some(format!("{name} is paralyzed! It can't move!")),
                    roll: Some(roll),
                    cleared: None,
                }
            } else {
                MoveCheck {
                    roll: Some(roll),
                    ..MoveCheck::free()
                }
            }
        }
        Some(Status::Sleep) => {
            mon.status_turns = mon.status_turns.saturating_sub(1);
            if mon.status_turns == 0 {
                mon.clear_status();
                MoveCheck {
                    message: Some(format!("{name} woke up!")),
                    cleared: Some(Status::Sleep),
                    ..MoveCheck::free()
                }
            } else {
                MoveCheck {
                    can_move: false,
                    message: Some(format!("{name} is fast asleep.")),
                    roll: None,
                    cleared: None,
                }
            }
        }
        Some(Status::Bind) => {
            mon.status_turns = mon.status_turns.saturating_sub(1);
            if mon.status_turns == 0 {
                mon.clear_status();
                return MoveCheck {
                    message: Some(format!("{name} broke free!")),
                    cleared: Some(Status::Bind),
                    ..MoveCheck::free()
                };
            }
            let roll = roll_unit(rng);
            if roll < balance.bind_escape_chance {
                mon.clear_status();
                MoveCheck {
                    message: Some(format!("{name} wriggled out of the hold!")),
                    roll: Some(roll),
                    cleared: Some(Status::Bind),
                    ..MoveCheck::free()
                }
            } else {
                MoveCheck {
                    can_move: false,
                    message: Some(format!("{name} is bound and can't move!")),
                    roll: Some(roll),
                    cleared: None,
                }
            }
        }
    }
}

/// Residual damage from poison (1/8) or burn (1/16), at least 1.
pub fn process_end_of_turn_status(mon: &mut Arthropod) -> Option<StatusTick> {
    let status = mon.status?;
    let divisor = match status {
        Status::Poison => 8,
        Status::Burn => 16,
        _ => return None,
    };
    let damage = (mon.max_hp / divisor).max(1);
    mon.take_damage(damage);
    let cause = match status {
        Status::Poison => "poison",
        _ => "its burn",
    };
    Some(StatusTick {
        status,
        damage,
        message: format!("{} is hurt by {cause}! ({damage} damage)", mon.name()),
    })
}

pub fn burn_attack_multiplier(mon: &Arthropod, category: ActionCategory) -> f64 {
    if mon.status == Some(Status::Burn) && category.is_physical() {
        0.5
    } else {
        1.0
    }
}

pub fn paralysis_speed_multiplier(mon: &Arthropod) -> f64 {
    if mon.status == Some(Status::Paralysis) {
        0.5
    } else {
        1.0
    }
}
