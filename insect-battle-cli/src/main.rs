mod ui;

use anyhow::{anyhow, bail, Context};
use insect_battle_core::battle_logger::BattleLogger;
use insect_battle_core::config::BattleConfig;
use insect_battle_core::data::actions::{get_action, ACTIONS};
use insect_battle_core::data::species::{get_species, SpeciesData, SPECIES_LIST};
use insect_battle_core::recorder::MatchLog;
use insect_battle_core::replay::{hp_trajectory, reconstruct, verify_snapshots};
use insect_battle_core::sim::environment::{environment_bonus, format_bonus, random_environment};
use insect_battle_core::sim::{
    simulate_battle, simulate_battle_with_replay, simulate_many, BattleResult, SimulationOptions,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;
use std::env;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 0xBADC0DE;

/// Flags shared by the battle-running subcommands.
#[derive(Default)]
struct RunArgs {
    species: Vec<String>,
    seed: Option<u64>,
    count: Option<u32>,
    config_path: Option<String>,
    preset: Option<String>,
    random_env: bool,
    log_json: Option<String>,
    replay_json: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("list-species") => list_species(),
        Some("list-actions") => list_actions(),
        Some("check-species") => {
            let id = args
                .next()
                .ok_or_else(|| anyhow!("Usage: insect-battle-cli check-species <species>"))?;
            check_species(&id)
        }
        Some("check-action") => {
            let id = args
                .next()
                .ok_or_else(|| anyhow!("Usage: insect-battle-cli check-action <action>"))?;
            check_action(&id)
        }
        Some("battle") => run_battle(parse_run_args(args)?),
        Some("stats") => run_stats(parse_run_args(args)?),
        Some("play") => {
            let run = parse_run_args(args)?;
            let (a, b) = species_pair(&run)?;
            let config = load_config(&run)?;
            ui::play(a, b, config, run.seed.unwrap_or(DEFAULT_SEED))
        }
        Some("replay") => {
            let path = args
                .next()
                .ok_or_else(|| anyhow!("Usage: insect-battle-cli replay <match.json>"))?;
            replay(&path)
        }
        Some(cmd) => Err(anyhow!("Unknown command '{}'\n{}", cmd, usage())),
        None => {
            println!("{}", usage());
            Ok(())
        }
    }
}

fn usage() -> &'static str {
    "Usage: insect-battle-cli <command>\n\
     \n\
     Commands:\n\
       list-species\n\
       list-actions\n\
       check-species <species>\n\
       check-action <action>\n\
       battle <a> <b> [--seed N] [--config cfg.json] [--preset NAME] [--random-env]\n\
              [--log-json out.json] [--replay-json out.json]\n\
       stats <a> <b> [--count N] [--seed N] [--config cfg.json] [--preset NAME] [--random-env]\n\
       play <a> <b> [--seed N] [--config cfg.json] [--preset NAME]\n\
     \n\
     Presets: default, classic, arthropod. --config takes precedence.\n\
       replay <match.json>"
}

fn parse_run_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<RunArgs> {
    let mut run = RunArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => run.seed = Some(parse_value(&mut args, "--seed")?),
            "--count" => run.count = Some(parse_value(&mut args, "--count")?),
            "--config" => run.config_path = Some(next_value(&mut args, "--config")?),
            "--preset" => run.preset = Some(next_value(&mut args, "--preset")?),
            "--log-json" => run.log_json = Some(next_value(&mut args, "--log-json")?),
            "--replay-json" => run.replay_json = Some(next_value(&mut args, "--replay-json")?),
            "--random-env" => run.random_env = true,
            flag if flag.starts_with("--") => bail!("Unknown arg '{}'\n{}", flag, usage()),
            _ => run.species.push(arg),
        }
    }
    Ok(run)
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    args.next().ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn parse_value<T>(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = next_value(args, flag)?;
    raw.parse()
        .with_context(|| format!("invalid value '{}' for {}", raw, flag))
}

fn species_pair(run: &RunArgs) -> anyhow::Result<(&'static SpeciesData, &'static SpeciesData)> {
    match run.species.as_slice() {
        [a, b] => Ok((lookup_species(a)?, lookup_species(b)?)),
        _ => bail!("expected exactly two species ids\n{}", usage()),
    }
}

fn lookup_species(id: &str) -> anyhow::Result<&'static SpeciesData> {
    get_species(id).ok_or_else(|| anyhow!("Species '{}' not found", id))
}

fn load_config(run: &RunArgs) -> anyhow::Result<BattleConfig> {
    let Some(path) = run.config_path.as_deref() else {
        let name = run.preset.as_deref().unwrap_or("default");
        return BattleConfig::preset(name)
            .ok_or_else(|| anyhow!("unknown preset '{}' (default, classic, arthropod)", name));
    };
    let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse config {}", path))
}

fn build_options(run: &RunArgs, rng: &mut SmallRng) -> anyhow::Result<SimulationOptions> {
    let config = load_config(&run)?;
    let environment = if run.random_env {
        Some(random_environment(rng))
    } else {
        None
    };
    Ok(SimulationOptions {
        config,
        environment,
        ..SimulationOptions::default()
    })
}

fn run_battle(run: RunArgs) -> anyhow::Result<()> {
    let (a, b) = species_pair(&run)?;
    let seed = run.seed.unwrap_or(DEFAULT_SEED);
    let mut rng = SmallRng::seed_from_u64(seed);
    let options = build_options(&run, &mut rng)?;
    info!(a = a.id, b = b.id, seed, "starting battle");

    if let Some(env) = &options.environment {
        println!(
            "{} {} / {} {}",
            a.name,
            format_bonus(environment_bonus(a, env)),
            b.name,
            format_bonus(environment_bonus(b, env))
        );
    }

    let state = if let Some(path) = &run.replay_json {
        let match_id = format!("{}-vs-{}-{}", a.id, b.id, seed);
        let (state, log) = simulate_battle_with_replay(a, b, &options, &mut rng, &match_id)?;
        fs::write(path, log.to_json()? + "\n")
            .with_context(|| format!("failed to write {}", path))?;
        state
    } else {
        simulate_battle(a, b, &options, &mut rng)?
    };

    let logger = BattleLogger::from_state(format!("{} vs {}", a.name, b.name), &state);
    for line in logger.log_lines() {
        println!("{line}");
    }
    if let Some(path) = &run.log_json {
        let mut value = logger.to_json();
        value["seed"] = json!(seed);
        value["entries"] = serde_json::to_value(&state.log)?;
        fs::write(path, serde_json::to_string_pretty(&value)? + "\n")
            .with_context(|| format!("failed to write {}", path))?;
    }
    Ok(())
}

fn run_stats(run: RunArgs) -> anyhow::Result<()> {
    let (a, b) = species_pair(&run)?;
    let seed = run.seed.unwrap_or(DEFAULT_SEED);
    let count = run.count.unwrap_or(1000);
    if count == 0 {
        bail!("--count must be positive");
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let options = build_options(&run, &mut rng)?;
    info!(a = a.id, b = b.id, seed, count, "starting statistics run");
    let summary = simulate_many(a, b, count, &options, seed)?;
    println!("{} vs {} ({} battles)", a.name, b.name, count);
    println!(
        "  {} wins: {}  {} wins: {}  draws: {}",
        a.name, summary.a_wins, b.name, summary.b_wins, summary.draws
    );
    println!(
        "  win rate: {:.1}%  avg turns: {:.1}",
        summary.win_rate, summary.avg_turns
    );
    Ok(())
}

fn replay(path: &str) -> anyhow::Result<()> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let log = MatchLog::from_json(&content).with_context(|| format!("failed to parse {}", path))?;
    verify_snapshots(&log).with_context(|| format!("match log {} is inconsistent", log.id))?;
    for (sequence, hp_a, hp_b) in hp_trajectory(&log) {
        println!("#{sequence:>4}  A {hp_a:>4}  B {hp_b:>4}");
    }
    let last = reconstruct(&log);
    println!(
        "final (turn {}): {} {}/{}  {} {}/{}",
        last.turn,
        last.side_a.species_id,
        last.side_a.current_hp,
        last.side_a.max_hp,
        last.side_b.species_id,
        last.side_b.current_hp,
        last.side_b.max_hp
    );
    Ok(())
}

fn list_species() -> anyhow::Result<()> {
    for species in SPECIES_LIST.iter() {
        println!("{} ({}) [{}]", species.name, species.id, species.style.as_str());
    }
    Ok(())
}

fn list_actions() -> anyhow::Result<()> {
    let mut entries: Vec<_> = ACTIONS.entries().collect();
    entries.sort_by_key(|(id, _)| *id);
    for (id, action) in entries {
        println!("{} ({}) power {} acc {}", action.name, id, action.power, action.accuracy);
    }
    Ok(())
}

fn check_species(id: &str) -> anyhow::Result<()> {
    let data = lookup_species(id)?;
    println!(
        "Found species: {} / {} Style: {} Weapon: {:?} Armor: {}",
        data.name,
        data.name_ko,
        data.style.as_str(),
        data.weapon.kind,
        data.armor_rating
    );
    println!(
        "Base stats - HP: {}, Atk: {}, Def: {}, Spe: {}  Weight: {}g",
        data.base_stats.hp,
        data.base_stats.attack,
        data.base_stats.defense,
        data.base_stats.speed,
        data.weight_g
    );
    for action_id in data.actions {
        match get_action(action_id) {
            Some(action) => println!("  {} ({})", action.name, action.id),
            None => println!("  {} (unknown, ignored)", action_id),
        }
    }
    Ok(())
}

fn check_action(id: &str) -> anyhow::Result<()> {
    let data = get_action(id).ok_or_else(|| anyhow!("Action '{}' not found", id))?;
    println!(
        "Found action: {} (category: {:?}, power: {}, accuracy: {}, priority: {})",
        data.name, data.category, data.power, data.accuracy, data.priority
    );
    if let Some(effect) = &data.effect {
        println!("  effect: {}", serde_json::to_string(effect)?);
    }
    if let Some(mode) = data.mode {
        println!("  enters {} stance", mode.as_str());
    }
    let users: Vec<_> = SPECIES_LIST
        .iter()
        .filter(|s| s.actions.iter().any(|action| *action == id))
        .map(|s| s.id)
        .collect();
    println!("  used by: {}", users.join(", "));
    Ok(())
}

pub(crate) fn result_label(result: Option<BattleResult>) -> &'static str {
    match result {
        Some(BattleResult::SideAWins) => "side A wins",
        Some(BattleResult::SideBWins) => "side B wins",
        Some(BattleResult::Draw) => "draw",
        None => "unfinished",
    }
}
