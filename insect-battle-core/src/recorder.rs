//! Append-only recording of every decision taken inside a battle.
//!
//! A [`BattleRecorder`] is fed by the turn executor. Its actions carry the
//! literal rolled values and every state delta, so a [`MatchLog`] can be
//! replayed without an RNG (see [`crate::replay`]).

use crate::data::types::{BattleMode, Stat, Status};
use crate::sim::arthropod::Arthropod;
use crate::sim::battle::{BattleState, Side};
use crate::sim::damage::{DamageFactors, Effectiveness};
use crate::sim::stages::StatStages;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArthropodSnapshot {
    pub species_id: String,
    pub current_hp: u16,
    pub max_hp: u16,
    pub stages: StatStages,
    pub status: Option<Status>,
    pub status_turns: u8,
    pub mode: Option<BattleMode>,
    pub mode_turns: u8,
}

impl From<&Arthropod> for ArthropodSnapshot {
    fn from(mon: &Arthropod) -> Self {
        Self {
            species_id: mon.species.id.to_string(),
            current_hp: mon.current_hp,
            max_hp: mon.max_hp,
            stages: mon.stages,
            status: mon.status,
            status_turns: mon.status_turns,
            mode: mon.mode,
            mode_turns: mon.mode_turns,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub turn: u32,
    pub side_a: ArthropodSnapshot,
    pub side_b: ArthropodSnapshot,
    pub timestamp: DateTime<Utc>,
}

impl BattleSnapshot {
    pub fn capture(turn: u32, mon_a: &Arthropod, mon_b: &Arthropod) -> Self {
        Self {
            turn,
            side_a: mon_a.into(),
            side_b: mon_b.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn of_state(state: &BattleState) -> Self {
        Self::capture(state.turn, &state.arthropod_a, &state.arthropod_b)
    }

    pub fn side(&self, side: Side) -> &ArthropodSnapshot {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut ArthropodSnapshot {
        match side {
            Side::A => &mut self.side_a,
            Side::B => &mut self.side_b,
        }
    }
}

/// Payload of one recorded decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordedEvent {
    TurnStart,
    MoveSelect {
        action_id: String,
    },
    TurnOrder {
        first: Side,
        tie_roll: Option<f64>,
    },
    /// Status gate at the start of an action. `remaining_turns` is the
    /// counter after the check.
    MovementCheck {
        condition: Status,
        can_move: bool,
        remaining_turns: u8,
        cleared: bool,
        roll: Option<f64>,
    },
    ActionSkipped {
        reason: String,
    },
    ModeEntered {
        mode: BattleMode,
        duration: u8,
    },
    MoveExecute {
        action_id: String,
        hit: bool,
        chance: Option<f64>,
        roll: Option<f64>,
    },
    DamageDealt {
        action_id: String,
        target: Side,
        damage: u16,
        critical: bool,
        effectiveness: Effectiveness,
        factors: DamageFactors,
    },
    StatusApplied {
        target: Side,
        condition: Status,
        duration: u8,
    },
    StatChanged {
        target: Side,
        stat: Stat,
        stages: i8,
        new_value: i8,
    },
    Healed {
        amount: u16,
    },
    StatusDamage {
        condition: Status,
        damage: u16,
    },
    ModeCountdown {
        mode: BattleMode,
        remaining: u8,
    },
    Faint {
        final_hp: u16,
    },
    TurnEnd,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleAction {
    pub sequence: u32,
    pub turn: u32,
    pub actor: Option<Side>,
    pub event: RecordedEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<BattleSnapshot>,
}

#[derive(Clone, Debug)]
pub struct BattleRecorder {
    initial: BattleSnapshot,
    actions: Vec<BattleAction>,
    sequence: u32,
}

impl BattleRecorder {
    pub fn new(mon_a: &Arthropod, mon_b: &Arthropod) -> Self {
        Self {
            initial: BattleSnapshot::capture(0, mon_a, mon_b),
            actions: Vec::new(),
            sequence: 0,
        }
    }

    pub fn record(&mut self, turn: u32, actor: Option<Side>, event: RecordedEvent) {
        self.push(turn, actor, event, None);
    }

    /// Records a state-mutating decision along with the state it produced.
    pub fn record_with_snapshot(
        &mut self,
        turn: u32,
        actor: Option<Side>,
        event: RecordedEvent,
        state: &BattleState,
    ) {
        self.push(turn, actor, event, Some(BattleSnapshot::of_state(state)));
    }

    fn push(
        &mut self,
        turn: u32,
        actor: Option<Side>,
        event: RecordedEvent,
        snapshot: Option<BattleSnapshot>,
    ) {
        self.sequence += 1;
        self.actions.push(BattleAction {
            sequence: self.sequence,
            turn,
            actor,
            event,
            snapshot,
        });
    }

    pub fn initial_snapshot(&self) -> &BattleSnapshot {
        &self.initial
    }

    pub fn actions(&self) -> &[BattleAction] {
        &self.actions
    }

    pub fn into_match_log(self, id: impl Into<String>, match_id: impl Into<String>) -> MatchLog {
        MatchLog {
            id: id.into(),
            match_id: match_id.into(),
            initial_snapshot: self.initial,
            actions: self.actions,
            created_at: Utc::now(),
        }
    }
}

/// Persisted container for a recorded battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchLog {
    pub id: String,
    pub match_id: String,
    pub initial_snapshot: BattleSnapshot,
    pub actions: Vec<BattleAction>,
    pub created_at: DateTime<Utc>,
}

impl MatchLog {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
