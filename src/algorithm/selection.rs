//! Lowest-entropy cell selection

use crate::io::configuration::ENTROPY_TOLERANCE;
use crate::math::probability::weighted_entropy;
use crate::spatial::grid::{Cell, Grid, Position};

/// How a cell's uncertainty is scored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntropyMode {
    /// Number of remaining candidates
    #[default]
    Count,
    /// Shannon entropy of the remaining candidates' weights
    Weighted,
}

/// How one cell is picked among equally uncertain cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Uniformly at random from the seeded source
    #[default]
    Random,
    /// First in grid order
    First,
}

/// Score a cell's uncertainty
///
/// `weights` is indexed by catalog index; missing entries weigh 1.0.
pub fn cell_entropy(cell: &Cell, mode: EntropyMode, weights: &[f64]) -> f64 {
    match mode {
        EntropyMode::Count => cell.domain.count() as f64,
        EntropyMode::Weighted => {
            let candidate_weights: Vec<f64> = cell
                .domain
                .iter()
                .map(|index| weights.get(index).copied().unwrap_or(1.0))
                .collect();
            weighted_entropy(&candidate_weights)
        }
    }
}

/// Uncollapsed cells tied at the lowest score, in grid order
///
/// Uncollapsed cells with an empty domain are dead ends; when any exist only
/// they are returned so the caller meets the contradiction immediately.
pub fn lowest_entropy_cells(grid: &Grid, mode: EntropyMode, weights: &[f64]) -> Vec<Position> {
    let open: Vec<&Cell> = grid.cells().filter(|cell| !cell.is_collapsed()).collect();

    let dead_ends: Vec<Position> = open
        .iter()
        .filter(|cell| cell.domain.is_empty())
        .map(|cell| cell.position)
        .collect();
    if !dead_ends.is_empty() {
        return dead_ends;
    }

    let mut best = f64::INFINITY;
    let mut candidates = Vec::new();
    for cell in open {
        let score = cell_entropy(cell, mode, weights);
        if score < best - ENTROPY_TOLERANCE {
            best = score;
            candidates.clear();
            candidates.push(cell.position);
        } else if (score - best).abs() <= ENTROPY_TOLERANCE {
            candidates.push(cell.position);
        }
    }

    candidates
}
