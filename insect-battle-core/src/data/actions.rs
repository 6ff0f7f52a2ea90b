use super::types::{BattleMode, Stat, Status};
use phf::phf_map;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    Attack,
    Defense,
    Special,
}

impl ActionCategory {
    /// Physical actions are the ones weakened by burn.
    pub fn is_physical(self) -> bool {
        matches!(self, ActionCategory::Attack)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectTarget {
    User,
    Opponent,
}

/// Secondary effect attached to an action.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionEffect {
    StatChange {
        target: EffectTarget,
        stat: Stat,
        stages: i8,
    },
    StatusCondition {
        target: EffectTarget,
        condition: Status,
    },
    /// Restores a percentage of the user's max HP.
    Heal { percent: u8 },
    /// Drives the opponent out of the arena.
    ForceSwitch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub id: &'static str,
    pub name: &'static str,
    pub name_ko: &'static str,
    pub category: ActionCategory,
    pub power: u16,
    pub accuracy: u8,
    pub priority: i8,
    pub effect: Option<ActionEffect>,
    pub mode: Option<BattleMode>,
}

impl Action {
    pub fn is_damaging(&self) -> bool {
        self.power > 0
    }

    pub fn inflicts(&self, status: Status) -> bool {
        matches!(
            self.effect,
            Some(ActionEffect::StatusCondition {
                target: EffectTarget::Opponent,
                condition,
            }) if condition == status
        )
    }
}

const fn strike(
    id: &'static str,
    name: &'static str,
    name_ko: &'static str,
    power: u16,
    accuracy: u8,
    priority: i8,
) -> Action {
    Action {
        id,
        name,
        name_ko,
        category: ActionCategory::Attack,
        power,
        accuracy,
        priority,
        effect: None,
        mode: None,
    }
}

const fn with_effect(action: Action, category: ActionCategory, effect: ActionEffect) -> Action {
    Action {
        category,
        effect: Some(effect),
        ..action
    }
}

const fn inflict(condition: Status) -> ActionEffect {
    ActionEffect::StatusCondition {
        target: EffectTarget::Opponent,
        condition,
    }
}

const fn lower(stat: Stat, stages: i8) -> ActionEffect {
    ActionEffect::StatChange {
        target: EffectTarget::Opponent,
        stat,
        stages,
    }
}

const fn raise(stat: Stat, stages: i8) -> ActionEffect {
    ActionEffect::StatChange {
        target: EffectTarget::User,
        stat,
        stages,
    }
}

const fn stance(
    id: &'static str,
    name: &'static str,
    name_ko: &'static str,
    mode: BattleMode,
) -> Action {
    Action {
        id,
        name,
        name_ko,
        category: ActionCategory::Defense,
        power: 0,
        accuracy: 100,
        priority: 0,
        effect: None,
        mode: Some(mode),
    }
}

use ActionCategory::{Attack, Defense, Special};

pub static ACTIONS: phf::Map<&'static str, Action> = phf_map! {
    "horn_lift" => strike("horn_lift", "Horn Lift", "뿔로 들어올리기", 85, 90, 0),
    "horn_thrust" => strike("horn_thrust", "Horn Thrust", "뿔 찌르기", 70, 95, 1),
    "shell_guard" => with_effect(
        strike("shell_guard", "Shell Guard", "갑각 방어", 0, 100, 0),
        Defense,
        raise(Stat::Defense, 2),
    ),
    "grapple" => with_effect(
        strike("grapple", "Grapple", "붙잡기", 60, 85, 0),
        Attack,
        inflict(Status::Bind),
    ),
    "pincer_crush" => strike("pincer_crush", "Pincer Crush", "집게로 조이기", 80, 90, 0),
    "pincer_grip" => with_effect(
        strike("pincer_grip", "Pincer Grip", "집게 물기", 65, 95, 0),
        Attack,
        lower(Stat::Evasion, -1),
    ),
    "quick_snip" => strike("quick_snip", "Quick Snip", "재빠른 집기", 50, 100, 1),
    "venom_strike" => with_effect(
        strike("venom_strike", "Venom Strike", "독침 공격", 75, 90, 0),
        Attack,
        inflict(Status::Poison),
    ),
    "pincer_grab" => strike("pincer_grab", "Pincer Grab", "집게 잡기", 55, 95, 0),
    "tail_whip" => with_effect(
        strike("tail_whip", "Tail Whip", "꼬리 휘두르기", 60, 100, 0),
        Attack,
        lower(Stat::Defense, -1),
    ),
    "toxic_sting" => with_effect(
        strike("toxic_sting", "Toxic Sting", "맹독 찌르기", 90, 80, 0),
        Special,
        inflict(Status::Poison),
    ),
    "fang_bite" => with_effect(
        strike("fang_bite", "Fang Bite", "독니 물기", 70, 90, 0),
        Attack,
        inflict(Status::Poison),
    ),
    "web_trap" => with_effect(
        strike("web_trap", "Web Trap", "거미줄 덫", 0, 85, 0),
        Special,
        inflict(Status::Bind),
    ),
    "hair_flick" => with_effect(
        strike("hair_flick", "Hair Flick", "털 날리기", 30, 100, 1),
        Defense,
        lower(Stat::Evasion, -1),
    ),
    "venom_inject" => with_effect(
        strike("venom_inject", "Venom Inject", "독 주입", 85, 85, 0),
        Special,
        inflict(Status::Poison),
    ),
    "scythe_strike" => strike("scythe_strike", "Scythe Strike", "낫다리 베기", 85, 95, 0),
    "rapid_slash" => strike("rapid_slash", "Rapid Slash", "연속 베기", 55, 100, 1),
    "ambush" => strike("ambush", "Ambush", "기습", 95, 85, 0),
    "death_grip" => with_effect(
        strike("death_grip", "Death Grip", "죽음의 움켜쥠", 75, 90, 0),
        Attack,
        inflict(Status::Bind),
    ),
    "forcipule_bite" => with_effect(
        strike("forcipule_bite", "Forcipule Bite", "악턱 물기", 80, 90, 0),
        Attack,
        inflict(Status::Poison),
    ),
    "coil_crush" => with_effect(
        strike("coil_crush", "Coil Crush", "휘감아 조이기", 70, 85, 0),
        Attack,
        inflict(Status::Bind),
    ),
    "leg_swarm" => strike("leg_swarm", "Leg Swarm", "다리 폭풍", 60, 100, 0),
    "megahorn" => strike("megahorn", "Megahorn", "메가혼", 120, 85, 0),
    "numbing_sting" => with_effect(
        strike("numbing_sting", "Numbing Sting", "마비 독침", 40, 100, 0),
        Special,
        inflict(Status::Paralysis),
    ),
    "spore_cloud" => with_effect(
        strike("spore_cloud", "Spore Cloud", "포자 구름", 0, 75, 0),
        Special,
        inflict(Status::Sleep),
    ),
    "acid_spray" => with_effect(
        strike("acid_spray", "Acid Spray", "산성 분사", 65, 90, 0),
        Special,
        inflict(Status::Burn),
    ),
    "war_dance" => with_effect(
        strike("war_dance", "War Dance", "전투의 춤", 0, 100, 0),
        Defense,
        raise(Stat::Strength, 2),
    ),
    "skitter" => with_effect(
        strike("skitter", "Skitter", "재빠른 질주", 0, 100, 0),
        Defense,
        raise(Stat::Speed, 2),
    ),
    "molt" => with_effect(
        strike("molt", "Molt", "탈피", 0, 100, 0),
        Defense,
        ActionEffect::Heal { percent: 50 },
    ),
    "wing_buffet" => with_effect(
        strike("wing_buffet", "Wing Buffet", "날개 바람", 40, 100, -1),
        Special,
        ActionEffect::ForceSwitch,
    ),
    "flee" => stance("flee", "Flee", "도망치기", BattleMode::Flee),
    "brace" => stance("brace", "Brace", "버티기", BattleMode::Brace),
};

pub fn get_action(id: &str) -> Option<&'static Action> {
    ACTIONS.get(id)
}

/// Resolves ids against [`ACTIONS`], silently dropping unknown ones.
pub fn resolve_actions(ids: &[&str]) -> Vec<&'static Action> {
    ids.iter().filter_map(|id| get_action(id)).collect()
}
