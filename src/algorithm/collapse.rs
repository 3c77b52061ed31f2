//! Weighted label choice for a single cell

use crate::io::error::{Result, SolverError};
use crate::spatial::grid::{Cell, Position};
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generic weighted random selection
    ///
    /// Returns index into weights array using cumulative distribution
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        weights.len().saturating_sub(1)
    }

    /// Uniform index in `0..len`, or 0 when `len` is 0
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Per-cell value field that boosts labels of matching value
///
/// A label whose value equals the cell's value has its weight multiplied by
/// `strength`. Cells outside the field and labels without a value are left
/// alone.
#[derive(Clone, Debug)]
pub struct BiasLayer {
    /// Value per planar cell, indexed `[x, y]`
    pub cell_values: Array2<u32>,
    /// Value per catalog index
    pub label_values: Vec<Option<u32>>,
    /// Weight multiplier for matching labels
    pub strength: f64,
}

impl BiasLayer {
    /// Multiplier applied to one label at one position
    pub fn factor(&self, position: Position, index: usize) -> f64 {
        let cell_value = self.cell_values.get([position[0], position[1]]);
        let label_value = self.label_values.get(index).copied().flatten();
        match (cell_value, label_value) {
            (Some(&cell), Some(label)) if cell == label => self.strength,
            _ => 1.0,
        }
    }
}

/// Weights used when drawing a label
#[derive(Clone, Debug)]
pub struct CollapsePolicy {
    /// Base weight per catalog index
    pub weights: Vec<f64>,
    /// Optional position-dependent boost
    pub bias: Option<BiasLayer>,
}

impl CollapsePolicy {
    /// Uniform or weighted policy without bias
    pub const fn new(weights: Vec<f64>) -> Self {
        Self {
            weights,
            bias: None,
        }
    }

    /// Weights of `candidates` at `position`, aligned with the slice
    pub fn weights_for(&self, position: Position, candidates: &[usize]) -> Vec<f64> {
        candidates
            .iter()
            .map(|&index| {
                let base = self.weights.get(index).copied().unwrap_or(1.0);
                let factor = self
                    .bias
                    .as_ref()
                    .map_or(1.0, |bias| bias.factor(position, index));
                base * factor
            })
            .collect()
    }
}

/// Draw one label from the cell's domain and mark the cell collapsed
///
/// Returns the chosen catalog index, or `None` when the domain is empty.
pub fn collapse(
    cell: &mut Cell,
    policy: &CollapsePolicy,
    selector: &mut RandomSelector,
) -> Option<usize> {
    let candidates = cell.domain.to_vec();
    if candidates.is_empty() {
        return None;
    }
    let weights = policy.weights_for(cell.position, &candidates);
    let chosen = candidates
        .get(selector.weighted_choice(&weights))
        .copied()?;
    cell.chosen = Some(chosen);
    Some(chosen)
}

/// Force a cell onto a label from its own catalog
///
/// # Errors
///
/// Returns an error if the label lies outside the cell's own catalog
pub fn collapse_to(cell: &mut Cell, index: usize) -> Result<()> {
    if !cell.permitted.contains(index) {
        return Err(SolverError::LabelNotPermitted {
            label: index.to_string(),
            position: cell.position,
        });
    }
    cell.chosen = Some(index);
    Ok(())
}

/// Undo a choice and remove that label from the cell's domain
pub fn reject(cell: &mut Cell, index: usize) {
    if cell.chosen == Some(index) {
        cell.chosen = None;
    }
    cell.domain.remove(index);
}

/// Return a cell to its full own catalog, uncollapsed
///
/// Fixed cells are left as they are.
pub fn reset_cell(cell: &mut Cell) {
    if cell.fixed {
        return;
    }
    cell.chosen = None;
    cell.domain = cell.permitted.clone();
}
