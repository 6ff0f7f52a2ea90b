use crate::sim::battle::{BattleLogEntry, BattleResult, BattleState, Side};
use crate::sim::environment::Environment;
use serde_json::json;

/// Renders a battle's narrated log as plain transcript lines.
#[derive(Clone, Debug, Default)]
pub struct BattleLogger {
    title: String,
    log: Vec<String>,
}

impl BattleLogger {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            log: Vec::new(),
        }
    }

    pub fn log_environment(&mut self, env: &Environment) {
        self.log.push(format!("environment: {env}"));
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.log.push(format!("--- turn {turn} ---"));
    }

    pub fn log_entry(&mut self, entry: &BattleLogEntry) {
        let mut line = match entry.actor {
            Some(side) => format!("[{}] {}", side_label(side), entry.text),
            None => entry.text.clone(),
        };
        if let Some(hp) = entry.remaining_hp {
            line.push_str(&format!(" (hp {}/{})", hp.a, hp.b));
        }
        self.log.push(line);
    }

    pub fn log_result(&mut self, state: &BattleState) {
        let line = match state.winner {
            Some(BattleResult::SideAWins) => format!("winner: {}", state.arthropod_a.name()),
            Some(BattleResult::SideBWins) => format!("winner: {}", state.arthropod_b.name()),
            Some(BattleResult::Draw) => "draw".to_string(),
            None => "unfinished".to_string(),
        };
        self.log.push(line);
    }

    /// Transcript of a whole battle, with a divider at every turn change.
    pub fn from_state(title: impl Into<String>, state: &BattleState) -> Self {
        let mut logger = Self::new(title);
        if let Some(env) = &state.environment {
            logger.log_environment(env);
        }
        let mut turn = 0;
        for entry in &state.log {
            if entry.turn != turn {
                turn = entry.turn;
                logger.log_turn(turn);
            }
            logger.log_entry(entry);
        }
        logger.log_result(state);
        logger
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "title": self.title,
            "log": self.log,
        })
    }
}

pub fn side_label(side: Side) -> &'static str {
    match side {
        Side::A => "A",
        Side::B => "B",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HpFormula;
    use crate::data::types::{Terrain, TimeOfDay, Weather};
    use crate::sim::arthropod::Arthropod;

    #[test]
    fn transcript_has_turn_dividers_and_result() {
        let a = Arthropod::from_id("stag_beetle", HpFormula::Scaled).unwrap();
        let b = Arthropod::from_id("tarantula", HpFormula::Scaled).unwrap();
        let env = Environment::new(Terrain::Forest, TimeOfDay::Night, Weather::Clear);
        let mut state = BattleState::new(a, b, Some(env));
        state.log.push(BattleLogEntry::text(1, Some(Side::A), "Stag Beetle used Quick Snip!"));
        state.log.push(BattleLogEntry::text(2, None, "The turn limit was reached."));
        state.finish(BattleResult::Draw);

        let logger = BattleLogger::from_state("demo", &state);
        assert_eq!(
            logger.log_lines(),
            &[
                "environment: forest / night / clear".to_string(),
                "--- turn 1 ---".to_string(),
                "[A] Stag Beetle used Quick Snip!".to_string(),
                "--- turn 2 ---".to_string(),
                "The turn limit was reached.".to_string(),
                "draw".to_string(),
            ]
        );
        assert_eq!(logger.to_json()["title"], "demo");
    }
}
