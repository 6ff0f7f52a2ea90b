use insect_battle_core::data::species::SpeciesData;
use insect_battle_core::error::BattleError;
use insect_battle_core::sim::{simulate_battle, BattleResult, SimulationOptions};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use tracing::debug;

/// Win-rate matrix; `rates[a][b]` is the rate of `species[a]` against
/// `species[b]`, counting draws as half a win.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WinMatrix {
    pub species: Vec<&'static str>,
    pub rates: Vec<Vec<f64>>,
}

impl WinMatrix {
    /// Mean win rate of each row, used to rank species.
    pub fn row_means(&self) -> Vec<(&'static str, f64)> {
        self.species
            .iter()
            .zip(&self.rates)
            .map(|(id, row)| {
                let mean = if row.is_empty() {
                    0.0
                } else {
                    row.iter().sum::<f64>() / row.len() as f64
                };
                (*id, mean)
            })
            .collect()
    }
}

pub fn compute_matrix(
    roster: &[&'static SpeciesData],
    sims_per_cell: usize,
    seed: u64,
    options: &SimulationOptions,
) -> Result<WinMatrix, BattleError> {
    let tasks: Vec<(usize, usize)> = (0..roster.len())
        .flat_map(|a| (0..roster.len()).map(move |b| (a, b)))
        .collect();
    let cell_results: Vec<CellResult> = tasks
        .par_iter()
        .map(|(a_idx, b_idx)| {
            let mut cell_rng =
                SmallRng::seed_from_u64(seed ^ ((*a_idx as u64) << 32) ^ (*b_idx as u64));
            let species_a = roster[*a_idx];
            let species_b = roster[*b_idx];
            let mut a_wins = 0u64;
            let mut ties = 0u64;
            for _ in 0..sims_per_cell {
                let mut battle_rng = SmallRng::seed_from_u64(cell_rng.gen());
                let state = simulate_battle(species_a, species_b, options, &mut battle_rng)?;
                match state.winner {
                    Some(BattleResult::SideAWins) => a_wins += 1,
                    Some(BattleResult::SideBWins) => {}
                    Some(BattleResult::Draw) | None => ties += 1,
                }
            }
            let total = sims_per_cell.max(1) as f64;
            let win_rate = (a_wins as f64 + 0.5 * ties as f64) / total;
            debug!(a = species_a.id, b = species_b.id, win_rate, "cell done");
            Ok(CellResult {
                a_idx: *a_idx,
                b_idx: *b_idx,
                win_rate,
            })
        })
        .collect::<Result<_, BattleError>>()?;

    let mut rates = vec![vec![0.0; roster.len()]; roster.len()];
    for cell in cell_results {
        rates[cell.a_idx][cell.b_idx] = cell.win_rate;
    }
    Ok(WinMatrix {
        species: roster.iter().map(|s| s.id).collect(),
        rates,
    })
}

/// Writes the matrix with a header row and a leading id column.
pub fn write_csv(matrix: &WinMatrix, path: &std::path::Path) -> anyhow::Result<()> {
    std::fs::write(path, to_csv(matrix))?;
    Ok(())
}

pub fn write_json(matrix: &WinMatrix, path: &std::path::Path) -> anyhow::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(matrix)? + "\n")?;
    Ok(())
}

pub fn to_csv(matrix: &WinMatrix) -> String {
    let mut out = String::from("species");
    for id in &matrix.species {
        out.push(',');
        out.push_str(id);
    }
    for (id, row) in matrix.species.iter().zip(&matrix.rates) {
        out.push('\n');
        out.push_str(id);
        for value in row {
            let _ = write!(out, ",{value:.4}");
        }
    }
    out.push('\n');
    out
}

struct CellResult {
    a_idx: usize,
    b_idx: usize,
    win_rate: f64,
}
