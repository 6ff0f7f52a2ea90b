use crate::result_label;
use anyhow::{bail, Result};
use insect_battle_core::battle_logger::side_label;
use insect_battle_core::config::BattleConfig;
use insect_battle_core::data::species::SpeciesData;
use insect_battle_core::engine::BattleEngine;
use insect_battle_core::sim::{AiPolicy, Arthropod};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::{self, Write};

/// Interactive battle: the player commands side A, the strategic AI side B.
pub fn play(
    species_a: &'static SpeciesData,
    species_b: &'static SpeciesData,
    config: BattleConfig,
    seed: u64,
) -> Result<()> {
    let mut engine = BattleEngine::new(species_a, species_b, config, None, seed)?;
    let mut ai_rng = SmallRng::seed_from_u64(seed.wrapping_add(1));

    while !engine.is_terminal() {
        let state = engine.state();
        println!();
        println!("=== turn {} ===", state.turn + 1);
        print_active("you", &state.arthropod_a);
        print_active("foe", &state.arthropod_b);

        let Some(choice) = prompt_action(&state.arthropod_a)? else {
            println!("Battle abandoned.");
            return Ok(());
        };
        let foe_choice = AiPolicy::Strategic
            .choose_action(&state.arthropod_b, &state.arthropod_a, &mut ai_rng)?
            .id;

        let step = engine.step(choice, foe_choice)?;
        for entry in &step.events {
            match entry.actor {
                Some(side) => println!("  [{}] {}", side_label(side), entry.text),
                None => println!("  {}", entry.text),
            }
        }
    }
    println!();
    println!("Result: {}", result_label(engine.state().winner));
    Ok(())
}

fn prompt_action(mon: &Arthropod) -> Result<Option<&'static str>> {
    loop {
        for (idx, action) in mon.actions.iter().enumerate() {
            println!(
                "  {}) {} (power {}, acc {})",
                idx + 1,
                action.name,
                action.power,
                action.accuracy
            );
        }
        print!("Choose an action (q to quit): ");
        let Some(input) = read_line()? else {
            bail!("stdin closed");
        };
        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=mon.actions.len()).contains(&n) => return Ok(Some(mon.actions[n - 1].id)),
            _ => println!("Enter a number between 1 and {}.", mon.actions.len()),
        }
    }
}

fn print_active(label: &str, mon: &Arthropod) {
    let status = mon.status.map(|s| s.as_str()).unwrap_or("ok");
    let mode = mon
        .mode
        .map(|m| format!(" {} ({})", m.as_str(), mon.mode_turns))
        .unwrap_or_default();
    println!(
        "{label}: {} {} {}/{} [{status}]{mode}",
        mon.name(),
        hp_bar(mon.current_hp, mon.max_hp),
        mon.current_hp,
        mon.max_hp
    );
}

fn hp_bar(hp: u16, max_hp: u16) -> String {
    let width = 20usize;
    let max = f32::from(max_hp.max(1));
    let filled = ((f32::from(hp) / max) * width as f32).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "=".repeat(filled), ".".repeat(width - filled))
}

/// `None` once stdin is exhausted.
fn read_line() -> Result<Option<String>> {
    let mut buf = String::new();
    io::stdout().flush()?;
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}
