pub mod matrix;

use crate::matrix::{compute_matrix, WinMatrix};
use anyhow::Context;
use insect_battle_core::config::BattleConfig;
use insect_battle_core::data::species::{get_species, SpeciesData, SPECIES_LIST};
use insect_battle_core::sim::{AiPolicy, SimulationOptions};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct CliOptions {
    /// Species ids to include; empty means the whole table.
    pub species: Vec<String>,
    pub sims_per_cell: usize,
    pub seed: u64,
    pub output_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub policy: AiPolicy,
}

pub fn load_config(path: &Path) -> anyhow::Result<BattleConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let parsed: BattleConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    Ok(parsed)
}

pub fn resolve_roster(ids: &[String]) -> anyhow::Result<Vec<&'static SpeciesData>> {
    if ids.is_empty() {
        return Ok(SPECIES_LIST.iter().copied().collect());
    }
    ids.iter()
        .map(|id| get_species(id).ok_or_else(|| anyhow::anyhow!("Unknown species {id}")))
        .collect()
}

pub fn build_matrix(opts: &CliOptions) -> anyhow::Result<WinMatrix> {
    if opts.sims_per_cell == 0 {
        anyhow::bail!("--sims-per-cell must be > 0");
    }
    let roster = resolve_roster(&opts.species)?;
    if roster.len() < 2 {
        anyhow::bail!("Need at least two species for a matrix");
    }
    let config = match &opts.config_path {
        Some(path) => load_config(path)?,
        None => BattleConfig::default(),
    };
    let sim_options = SimulationOptions {
        config,
        environment: None,
        policy_a: opts.policy,
        policy_b: opts.policy,
    };
    compute_matrix(&roster, opts.sims_per_cell, opts.seed, &sim_options)
        .context("Matrix simulation failed")
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let matrix = build_matrix(&opts)?;
    let is_json = opts
        .output_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        matrix::write_json(&matrix, &opts.output_path)?;
    } else {
        matrix::write_csv(&matrix, &opts.output_path)?;
    }
    let mut ranking = matrix.row_means();
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (id, mean) in &ranking {
        info!(species = id, mean_win_rate = mean, "ranking");
    }
    println!(
        "Wrote {}x{} matrix to {}",
        matrix.rates.len(),
        matrix.rates.first().map(|r| r.len()).unwrap_or(0),
        opts.output_path.display()
    );
    Ok(())
}
