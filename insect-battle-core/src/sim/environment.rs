use crate::data::species::SpeciesData;
use crate::data::types::{PreferredTime, Terrain, TimeOfDay, Weather};
use crate::sim::rng::roll_between;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TERRAIN_BONUS: f64 = 1.15;
pub const TIME_BONUS: f64 = 1.1;
pub const TIME_PENALTY: f64 = 0.9;
pub const WEATHER_BONUS: f64 = 1.1;
pub const WEATHER_PENALTY: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub terrain: Terrain,
    pub time: TimeOfDay,
    pub weather: Weather,
}

impl Environment {
    pub fn new(terrain: Terrain, time: TimeOfDay, weather: Weather) -> Self {
        Self {
            terrain,
            time,
            weather,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = match self.time {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        };
        let weather = match self.weather {
            Weather::Clear => "clear",
            Weather::Rain => "rain",
            Weather::Sunny => "sunny",
            Weather::Sandstorm => "sandstorm",
        };
        write!(f, "{} / {time} / {weather}", self.terrain.as_str())
    }
}

pub fn random_environment<R: Rng + ?Sized>(rng: &mut R) -> Environment {
    let terrain = Terrain::ALL[usize::from(roll_between(rng, 0, 3))];
    let time = if roll_between(rng, 0, 1) == 0 {
        TimeOfDay::Day
    } else {
        TimeOfDay::Night
    };
    let weather = Weather::ALL[usize::from(roll_between(rng, 0, 3))];
    Environment::new(terrain, time, weather)
}

fn weather_factor(species: &SpeciesData, env: &Environment) -> f64 {
    let Some(habitat) = species.habitat else {
        return 1.0;
    };
    match env.weather {
        Weather::Clear => 1.0,
        Weather::Rain if habitat.terrains.contains(&Terrain::Wetland) => WEATHER_BONUS,
        Weather::Sandstorm if habitat.terrains.contains(&Terrain::Desert) => WEATHER_BONUS,
        Weather::Rain | Weather::Sandstorm => 1.0,
        Weather::Sunny => match habitat.time {
            PreferredTime::Day => WEATHER_BONUS,
            PreferredTime::Night => WEATHER_PENALTY,
            PreferredTime::Both => 1.0,
        },
    }
}

/// Terrain × time × weather factor for `species` in `env`.
/// Species without a habitat preference are unaffected.
pub fn environment_bonus(species: &SpeciesData, env: &Environment) -> f64 {
    let Some(habitat) = species.habitat else {
        return 1.0;
    };
    let terrain = if habitat.terrains.contains(&env.terrain) {
        TERRAIN_BONUS
    } else {
        1.0
    };
    let time = if habitat.time.matches(env.time) {
        TIME_BONUS
    } else {
        TIME_PENALTY
    };
    terrain * time * weather_factor(species, env)
}

/// Renders a multiplier as a signed percentage, e.g. `+27%` or `±0%`.
pub fn format_bonus(bonus: f64) -> String {
    let percent = ((bonus - 1.0) * 100.0).round() as i64;
    match percent {
        0 => "±0%".to_string(),
        p if p > 0 => format!("+{p}%"),
        p => format!("{p}%"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::species::get_species;
    use crate::sim::rng::ScriptedRng;

    #[test]
    fn preferred_terrain_and_time_stack() {
        let beetle = get_species("rhinoceros_beetle").unwrap();
        let home = Environment::new(Terrain::Forest, TimeOfDay::Night, Weather::Clear);
        assert!((environment_bonus(beetle, &home) - 1.15 * 1.1).abs() < 1e-12);
        let away = Environment::new(Terrain::Desert, TimeOfDay::Day, Weather::Sunny);
        assert!((environment_bonus(beetle, &away) - 0.9 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn weather_rules_follow_habitat() {
        let water_bug = get_species("giant_water_bug").unwrap();
        let rain = Environment::new(Terrain::Cave, TimeOfDay::Day, Weather::Rain);
        assert!((environment_bonus(water_bug, &rain) - 1.1 * 1.1).abs() < 1e-12);
        let locust = get_species("desert_locust").unwrap();
        let storm = Environment::new(Terrain::Desert, TimeOfDay::Day, Weather::Sandstorm);
        assert!((environment_bonus(locust, &storm) - 1.15 * 1.1 * 1.1).abs() < 1e-12);
    }

    #[test]
    fn no_habitat_means_neutral() {
        let wasp = get_species("jewel_wasp").unwrap();
        let env = Environment::new(Terrain::Forest, TimeOfDay::Night, Weather::Sunny);
        assert_eq!(environment_bonus(wasp, &env), 1.0);
    }

    #[test]
    fn bonus_formatting() {
        assert_eq!(format_bonus(1.27), "+27%");
        assert_eq!(format_bonus(0.9), "-10%");
        assert_eq!(format_bonus(1.0), "±0%");
    }

    #[test]
    fn random_environment_is_seeded() {
        let env = random_environment(&mut ScriptedRng::new(vec![0.0, 0.99, 0.6]));
        assert_eq!(env, Environment::new(Terrain::Forest, TimeOfDay::Night, Weather::Sunny));
    }
}
