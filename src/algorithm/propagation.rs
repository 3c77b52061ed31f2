//! Domain refresh from collapsed neighbours
//!
//! Every call recomputes every uncollapsed cell's domain from scratch: the
//! cell's own catalog intersected with what each collapsed neighbour allows
//! towards it. Nothing is carried over between calls, so a backtrack only has
//! to restore chosen labels and the next refresh rebuilds consistent domains.

use crate::algorithm::bitset::Domain;
use crate::rules::table::CompiledRules;
use crate::spatial::grid::{Grid, Position};

/// Outcome of one propagation pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationSummary {
    /// Cells whose domain changed
    pub updated: usize,
    /// Uncollapsed cells left with an empty domain
    pub contradictions: Vec<Position>,
}

impl PropagationSummary {
    /// Test whether any cell ran out of candidates
    pub fn has_contradiction(&self) -> bool {
        !self.contradictions.is_empty()
    }
}

/// Domain an uncollapsed cell may take given its collapsed neighbours
///
/// A neighbour at direction `d` holding label `n` restricts the cell to
/// `allowed(n, d.opposite())`. Uncollapsed neighbours impose nothing.
pub fn constrained_domain(grid: &Grid, rules: &CompiledRules, position: Position) -> Option<Domain> {
    let cell = grid.cell(position)?;
    let mut domain = cell.permitted.clone();

    for (direction, next) in grid.neighbors(position) {
        let Some(chosen) = grid.cell(next).and_then(|neighbor| neighbor.chosen) else {
            continue;
        };
        match rules.allowed(chosen, direction.opposite()) {
            Some(allowed) => domain.intersect_with(allowed),
            None => domain.clear(),
        }
        if domain.is_empty() {
            break;
        }
    }

    Some(domain)
}

/// Recompute every uncollapsed cell's domain
///
/// Runs in two phases so that every new domain is derived from the same
/// grid state: collect, then apply. Collapsed cells are never touched.
pub fn refresh(grid: &mut Grid, rules: &CompiledRules) -> PropagationSummary {
    let updates: Vec<(Position, Domain)> = grid
        .cells()
        .filter(|cell| !cell.is_collapsed())
        .filter_map(|cell| {
            constrained_domain(grid, rules, cell.position).map(|domain| (cell.position, domain))
        })
        .collect();

    let mut summary = PropagationSummary::default();
    for (position, domain) in updates {
        if domain.is_empty() {
            summary.contradictions.push(position);
        }
        if let Some(cell) = grid.cell_mut(position) {
            if cell.domain != domain {
                cell.domain = domain;
                summary.updated += 1;
            }
        }
    }

    summary
}
