use super::types::{BehaviorStyle, PreferredTime, Terrain, WeaponType};
use once_cell::sync::Lazy;
use phf::phf_map;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weapon {
    pub kind: WeaponType,
    pub venomous: bool,
    pub venom_potency: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Habitat {
    pub terrains: &'static [Terrain],
    pub time: PreferredTime,
}

/// Immutable species template.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeciesData {
    pub id: &'static str,
    pub name: &'static str,
    pub name_ko: &'static str,
    pub style: BehaviorStyle,
    pub base_stats: BaseStats,
    pub weight_g: f64,
    pub aggression: u8,
    pub weapon: Weapon,
    pub armor_rating: u8,
    pub habitat: Option<Habitat>,
    pub actions: &'static [&'static str],
}

const fn stats(hp: u16, attack: u16, defense: u16, speed: u16) -> BaseStats {
    BaseStats {
        hp,
        attack,
        defense,
        speed,
    }
}

const fn weapon(kind: WeaponType, venom_potency: u8) -> Weapon {
    Weapon {
        kind,
        venomous: venom_potency > 0,
        venom_potency,
    }
}

const fn habitat(terrains: &'static [Terrain], time: PreferredTime) -> Option<Habitat> {
    Some(Habitat { terrains, time })
}

use BehaviorStyle::{Defensive, Grappler, Striker, Venomous};
use PreferredTime::{Both, Day, Night};
use Terrain::{Cave, Desert, Forest, Wetland};

pub static ARTHROPODS: phf::Map<&'static str, SpeciesData> = phf_map! {
    "rhinoceros_beetle" => SpeciesData {
        id: "rhinoceros_beetle",
        name: "Rhinoceros Beetle",
        name_ko: "장수풍뎅이",
        style: Grappler,
        base_stats: stats(95, 130, 115, 45),
        weight_g: 30.0,
        aggression: 55,
        weapon: weapon(WeaponType::Horn, 0),
        armor_rating: 85,
        habitat: habitat(&[Forest], Night),
        actions: &["horn_lift", "horn_thrust", "shell_guard", "grapple", "brace"],
    },
    "hercules_beetle" => SpeciesData {
        id: "hercules_beetle",
        name: "Hercules Beetle",
        name_ko: "헤라클레스장수풍뎅이",
        style: Grappler,
        base_stats: stats(100, 150, 120, 40),
        weight_g: 45.0,
        aggression: 50,
        weapon: weapon(WeaponType::Horn, 0),
        armor_rating: 90,
        habitat: habitat(&[Forest], Night),
        actions: &["megahorn", "horn_lift", "shell_guard", "brace"],
    },
    "stag_beetle" => SpeciesData {
        id: "stag_beetle",
        name: "Stag Beetle",
        name_ko: "사슴벌레",
        style: Grappler,
        base_stats: stats(75, 120, 100, 70),
        weight_g: 12.0,
        aggression: 70,
        weapon: weapon(WeaponType::Mandible, 0),
        armor_rating: 75,
        habitat: habitat(&[Forest], Night),
        actions: &["pincer_crush", "pincer_grip", "quick_snip", "war_dance", "brace"],
    },
    "emperor_scorpion" => SpeciesData {
        id: "emperor_scorpion",
        name: "Emperor Scorpion",
        name_ko: "황제전갈",
        style: Venomous,
        base_stats: stats(70, 110, 95, 50),
        weight_g: 30.0,
        aggression: 45,
        weapon: weapon(WeaponType::Stinger, 40),
        armor_rating: 70,
        habitat: habitat(&[Desert, Forest], Night),
        actions: &["venom_strike", "pincer_grab", "tail_whip", "brace"],
    },
    "deathstalker" => SpeciesData {
        id: "deathstalker",
        name: "Deathstalker Scorpion",
        name_ko: "데스스토커",
        style: Venomous,
        base_stats: stats(60, 95, 70, 85),
        weight_g: 2.0,
        aggression: 80,
        weapon: weapon(WeaponType::Stinger, 95),
        armor_rating: 45,
        habitat: habitat(&[Desert], Night),
        actions: &["toxic_sting", "numbing_sting", "pincer_grab", "flee"],
    },
    "tarantula" => SpeciesData {
        id: "tarantula",
        name: "Goliath Birdeater",
        name_ko: "골리앗버드이터",
        style: Venomous,
        base_stats: stats(85, 105, 75, 60),
        weight_g: 170.0,
        aggression: 40,
        weapon: weapon(WeaponType::Fang, 35),
        armor_rating: 35,
        habitat: habitat(&[Forest, Wetland], Night),
        actions: &["fang_bite", "web_trap", "hair_flick", "flee"],
    },
    "praying_mantis" => SpeciesData {
        id: "praying_mantis",
        name: "Praying Mantis",
        name_ko: "사마귀",
        style: Striker,
        base_stats: stats(70, 115, 70, 95),
        weight_g: 5.0,
        aggression: 85,
        weapon: weapon(WeaponType::Foreleg, 0),
        armor_rating: 30,
        habitat: habitat(&[Forest], Day),
        actions: &["scythe_strike", "rapid_slash", "ambush", "flee"],
    },
    "giant_centipede" => SpeciesData {
        id: "giant_centipede",
        name: "Amazonian Giant Centipede",
        name_ko: "아마존왕지네",
        style: Striker,
        base_stats: stats(80, 110, 65, 100),
        weight_g: 50.0,
        aggression: 90,
        weapon: weapon(WeaponType::Fang, 70),
        armor_rating: 50,
        habitat: habitat(&[Cave, Forest], Night),
        actions: &["forcipule_bite", "coil_crush", "leg_swarm", "rapid_slash"],
    },
    "giant_water_bug" => SpeciesData {
        id: "giant_water_bug",
        name: "Giant Water Bug",
        name_ko: "물장군",
        style: Grappler,
        base_stats: stats(80, 105, 85, 65),
        weight_g: 20.0,
        aggression: 65,
        weapon: weapon(WeaponType::Foreleg, 30),
        armor_rating: 60,
        habitat: habitat(&[Wetland], Both),
        actions: &["death_grip", "venom_inject", "ambush", "brace"],
    },
    "bombardier_beetle" => SpeciesData {
        id: "bombardier_beetle",
        name: "Bombardier Beetle",
        name_ko: "폭탄먼지벌레",
        style: Defensive,
        base_stats: stats(75, 80, 105, 70),
        weight_g: 1.0,
        aggression: 30,
        weapon: weapon(WeaponType::Mandible, 0),
        armor_rating: 65,
        habitat: habitat(&[Forest, Wetland], Night),
        actions: &["acid_spray", "quick_snip", "molt", "brace"],
    },
    "desert_locust" => SpeciesData {
        id: "desert_locust",
        name: "Desert Locust",
        name_ko: "사막메뚜기",
        style: Striker,
        base_stats: stats(65, 90, 60, 120),
        weight_g: 2.5,
        aggression: 60,
        weapon: weapon(WeaponType::Leg, 0),
        armor_rating: 40,
        habitat: habitat(&[Desert], Day),
        actions: &["leg_swarm", "quick_snip", "skitter", "wing_buffet", "flee"],
    },
    "jewel_wasp" => SpeciesData {
        id: "jewel_wasp",
        name: "Emerald Cockroach Wasp",
        name_ko: "보석말벌",
        style: Venomous,
        base_stats: stats(55, 85, 55, 115),
        weight_g: 0.5,
        aggression: 75,
        weapon: weapon(WeaponType::Stinger, 60),
        armor_rating: 25,
        habitat: None,
        actions: &["spore_cloud", "numbing_sting", "venom_strike", "flee"],
    },
};

/// All species, ordered by id.
pub static SPECIES_LIST: Lazy<Vec<&'static SpeciesData>> = Lazy::new(|| {
    let mut list: Vec<&'static SpeciesData> = ARTHROPODS.values().collect();
    list.sort_by(|l, r| l.id.cmp(r.id));
    list
});

pub fn get_species(id: &str) -> Option<&'static SpeciesData> {
    ARTHROPODS.get(id)
}
