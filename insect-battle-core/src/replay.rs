//! RNG-free replay of a recorded [`MatchLog`].
//!
//! Every state-mutating [`RecordedEvent`] carries its delta (damage dealt,
//! stage reached, duration rolled), so folding the actions over the initial
//! snapshot rebuilds the whole trajectory.

use crate::error::ReplayError;
use crate::recorder::{ArthropodSnapshot, BattleAction, BattleSnapshot, MatchLog, RecordedEvent};
use crate::sim::battle::Side;

/// Checks that sequence numbers run `1..=n` with no gaps or repeats.
pub fn verify_sequence(log: &MatchLog) -> Result<(), ReplayError> {
    if log.actions.is_empty() {
        return Err(ReplayError::EmptyLog(log.id.clone()));
    }
    for (index, action) in log.actions.iter().enumerate() {
        let expected = index as u32 + 1;
        if action.sequence != expected {
            return Err(ReplayError::SequenceGap {
                expected,
                found: action.sequence,
            });
        }
    }
    Ok(())
}

/// Applies one recorded action to `snapshot`.
pub fn apply_action(snapshot: &mut BattleSnapshot, action: &BattleAction) {
    snapshot.turn = action.turn;
    let actor = action.actor;
    match &action.event {
        RecordedEvent::MovementCheck {
            remaining_turns,
            cleared,
            ..
        } => {
            if let Some(side) = actor {
                let mon = snapshot.side_mut(side);
                mon.status_turns = *remaining_turns;
                if *cleared {
                    mon.status = None;
                    mon.status_turns = 0;
                }
            }
        }
        RecordedEvent::ModeEntered { mode, duration } => {
            if let Some(side) = actor {
                let mon = snapshot.side_mut(side);
                mon.mode = Some(*mode);
                mon.mode_turns = *duration;
            }
        }
        RecordedEvent::DamageDealt { target, damage, .. } => {
            lose_hp(snapshot.side_mut(*target), *damage);
        }
        RecordedEvent::StatusApplied {
            target,
            condition,
            duration,
        } => {
            let mon = snapshot.side_mut(*target);
            mon.status = Some(*condition);
            mon.status_turns = *duration;
        }
        RecordedEvent::StatChanged {
            target,
            stat,
            new_value,
            ..
        } => {
            snapshot.side_mut(*target).stages.set(*stat, *new_value);
        }
        RecordedEvent::Healed { amount } => {
            if let Some(side) = actor {
                let mon = snapshot.side_mut(side);
                mon.current_hp = mon.current_hp.saturating_add(*amount).min(mon.max_hp);
            }
        }
        RecordedEvent::StatusDamage { damage, .. } => {
            if let Some(side) = actor {
                lose_hp(snapshot.side_mut(side), *damage);
            }
        }
        RecordedEvent::ModeCountdown { remaining, .. } => {
            if let Some(side) = actor {
                let mon = snapshot.side_mut(side);
                mon.mode_turns = *remaining;
                if *remaining == 0 {
                    mon.mode = None;
                }
            }
        }
        RecordedEvent::Faint { final_hp } => {
            if let Some(side) = actor {
                snapshot.side_mut(side).current_hp = *final_hp;
            }
        }
        RecordedEvent::TurnStart
        | RecordedEvent::MoveSelect { .. }
        | RecordedEvent::TurnOrder { .. }
        | RecordedEvent::ActionSkipped { .. }
        | RecordedEvent::MoveExecute { .. }
        | RecordedEvent::TurnEnd => {}
    }
}

fn lose_hp(mon: &mut ArthropodSnapshot, amount: u16) {
    mon.current_hp = mon.current_hp.saturating_sub(amount);
}

/// Rebuilds the final snapshot from the initial one plus every delta.
pub fn reconstruct(log: &MatchLog) -> BattleSnapshot {
    let mut snapshot = log.initial_snapshot.clone();
    for action in &log.actions {
        apply_action(&mut snapshot, action);
    }
    snapshot
}

/// Replays the log and compares the rebuilt state with every attached
/// snapshot. Timestamps are ignored.
pub fn verify_snapshots(log: &MatchLog) -> Result<(), ReplayError> {
    verify_sequence(log)?;
    let mut snapshot = log.initial_snapshot.clone();
    for action in &log.actions {
        apply_action(&mut snapshot, action);
        if let Some(recorded) = &action.snapshot {
            let matches = [Side::A, Side::B]
                .into_iter()
                .all(|side| recorded.side(side) == snapshot.side(side));
            if !matches {
                return Err(ReplayError::SnapshotMismatch {
                    sequence: action.sequence,
                });
            }
        }
    }
    Ok(())
}

/// HP of both sides after every action, starting with the initial values.
pub fn hp_trajectory(log: &MatchLog) -> Vec<(u32, u16, u16)> {
    let mut snapshot = log.initial_snapshot.clone();
    let mut points = vec![(0, snapshot.side_a.current_hp, snapshot.side_b.current_hp)];
    for action in &log.actions {
        apply_action(&mut snapshot, action);
        points.push((
            action.sequence,
            snapshot.side_a.current_hp,
            snapshot.side_b.current_hp,
        ));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HpFormula;
    use crate::recorder::BattleRecorder;
    use crate::sim::arthropod::Arthropod;

    fn recorder() -> BattleRecorder {
        let a = Arthropod::from_id("stag_beetle", HpFormula::Scaled).unwrap();
        let b = Arthropod::from_id("tarantula", HpFormula::Scaled).unwrap();
        BattleRecorder::new(&a, &b)
    }

    #[test]
    fn empty_log_is_rejected() {
        let log = recorder().into_match_log("log-1", "match-1");
        assert_eq!(
            verify_sequence(&log),
            Err(ReplayError::EmptyLog("log-1".to_string()))
        );
    }

    #[test]
    fn gap_is_reported() {
        let mut rec = recorder();
        rec.record(1, None, RecordedEvent::TurnStart);
        rec.record(1, None, RecordedEvent::TurnEnd);
        let mut log = rec.into_match_log("log-1", "match-1");
        log.actions[1].sequence = 3;
        assert_eq!(
            verify_sequence(&log),
            Err(ReplayError::SequenceGap {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn deltas_fold_into_final_hp() {
        let mut rec = recorder();
        let start_b = rec.initial_snapshot().side_b.current_hp;
        rec.record(
            1,
            Some(Side::B),
            RecordedEvent::StatusDamage {
                condition: crate::data::types::Status::Poison,
                damage: 20,
            },
        );
        rec.record(1, Some(Side::B), RecordedEvent::Healed { amount: 5 });
        let log = rec.into_match_log("log-1", "match-1");
        let snapshot = reconstruct(&log);
        assert_eq!(snapshot.side_b.current_hp, start_b - 15);
        assert_eq!(snapshot.turn, 1);
        let trajectory = hp_trajectory(&log);
        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory[1].2, start_b - 20);
    }
}
