use crate::config::HpFormula;
use crate::data::actions::{resolve_actions, Action};
use crate::data::species::{get_species, SpeciesData};
use crate::data::types::{BattleMode, Status};
use crate::error::{BattleError, Result};
use crate::sim::stages::StatStages;

/// Mutable per-battle instance of a species.
#[derive(Clone, Debug, PartialEq)]
pub struct Arthropod {
    pub species: &'static SpeciesData,
    pub current_hp: u16,
    pub max_hp: u16,
    pub stages: StatStages,
    pub status: Option<Status>,
    /// Remaining sleep or bind turns.
    pub status_turns: u8,
    pub mode: Option<BattleMode>,
    pub mode_turns: u8,
    pub actions: Vec<&'static Action>,
}

impl Arthropod {
    pub fn new(species: &'static SpeciesData, hp_formula: HpFormula) -> Self {
        let max_hp = hp_formula.max_hp(species.base_stats.hp);
        Self {
            species,
            current_hp: max_hp,
            max_hp,
            stages: StatStages::default(),
            status: None,
            status_turns: 0,
            mode: None,
            mode_turns: 0,
            actions: resolve_actions(species.actions),
        }
    }

    pub fn from_id(id: &str, hp_formula: HpFormula) -> Result<Self> {
        let species = get_species(id).ok_or_else(|| BattleError::UnknownSpecies(id.to_string()))?;
        Ok(Self::new(species, hp_formula))
    }

    pub fn name(&self) -> &'static str {
        self.species.name
    }

    pub fn take_damage(&mut self, damage: u16) {
        self.current_hp = self.current_hp.saturating_sub(damage);
    }

    /// Restores HP up to `max_hp` and returns the amount actually healed.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let healed = amount.min(self.max_hp - self.current_hp);
        self.current_hp += healed;
        healed
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.current_hp) / f64::from(self.max_hp)
    }

    pub fn ensure_actions(&self) -> Result<()> {
        if self.actions.is_empty() {
            return Err(BattleError::NoActions {
                species: self.species.id.to_string(),
            });
        }
        Ok(())
    }
}
