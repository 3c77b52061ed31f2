//! Two chained passes joined by a carved footprint
//!
//! A planar coarse pass lays out walls and open ground. The open groups that
//! walls fully enclose become the footprint, which is upsampled onto a
//! volumetric fine grid. Fine cells outside the footprint are fixed to a void
//! label, and the footprint's bottom and top layers can be fixed to floor and
//! roof labels, before the fine pass fills the rest.

use crate::algorithm::bitset::Domain;
use crate::algorithm::executor::{CollapseObserver, PassState, SolverConfig, SolverPass, TickOutcome};
use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::rules::catalog::{Catalog, Label, WeightTable};
use crate::rules::table::RuleTable;
use crate::spatial::grid::Grid;
use crate::spatial::regions::enclosed_groups;
use crate::spatial::subdivision::{group_mask, upsample};
use ndarray::Array2;

/// How the coarse result is turned into the fine grid
#[derive(Clone, Debug)]
pub struct FootprintPlan {
    /// Fine cells per coarse cell along x and z
    pub factor: usize,
    /// Fine grid extent along y
    pub height: usize,
    /// Coarse labels that count as walls
    pub blocked: Vec<Label>,
    /// Fine label fixed outside the footprint
    pub void: Label,
    /// Fine label fixed on the footprint's bottom layer
    pub floor: Option<Label>,
    /// Fine label fixed on the footprint's top layer
    pub roof: Option<Label>,
}

/// Wall map of a planar grid, indexed `[x, y]`
///
/// Cells holding a label from `blocked`, and cells left uncollapsed, are walls.
pub fn occupancy_from_grid(grid: &Grid, blocked: &Domain) -> Array2<bool> {
    let [width, height, _] = grid.dimensions();
    Array2::from_shape_fn((width, height), |(x, y)| {
        grid.cell([x, y, 0])
            .and_then(|cell| cell.chosen)
            .is_none_or(|index| blocked.contains(index))
    })
}

/// Enclosed open area of a wall map, upsampled by `factor`
pub fn footprint_mask(occupancy: &Array2<bool>, factor: usize) -> Option<Array2<bool>> {
    let (width, height) = occupancy.dim();
    let mask = group_mask(width, height, &enclosed_groups(occupancy));
    upsample(&mask, factor)
}

/// Build the fine grid for a footprint mask
///
/// The mask's `[x, y]` axes map onto the fine grid's `x` and `z` axes.
///
/// # Errors
///
/// Returns an error if the height is zero or a seeded label is not in the
/// fine catalog
pub fn seed_fine_grid(
    mask: &Array2<bool>,
    height: usize,
    catalog: &Catalog,
    plan: &FootprintPlan,
) -> Result<Grid> {
    let (width, depth) = mask.dim();
    let mut grid = Grid::volumetric(width, height, depth, catalog.len())?;
    let void = catalog.require(&plan.void)?;
    let floor = plan.floor.as_ref().map(|l| catalog.require(l)).transpose()?;
    let roof = plan.roof.as_ref().map(|l| catalog.require(l)).transpose()?;

    for x in 0..width {
        for z in 0..depth {
            let inside = mask.get([x, z]).copied().unwrap_or(false);
            for y in 0..height {
                let seeded = if !inside {
                    Some(void)
                } else if y == 0 {
                    floor
                } else if y + 1 == height {
                    roof
                } else {
                    None
                };
                if let Some(index) = seeded {
                    grid.fix([x, y, z], index)?;
                }
            }
        }
    }

    Ok(grid)
}

/// Which pass a pipeline tick advanced
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineTick {
    /// The coarse pass ticked
    Coarse(TickOutcome),
    /// The fine pass ticked
    Fine(TickOutcome),
}

/// Inputs of the fine pass
#[derive(Clone, Debug)]
pub struct FineRules {
    /// Fine label catalog
    pub catalog: Catalog,
    /// Fine adjacency rules
    pub rules: RuleTable,
    /// Fine collapse weights
    pub weights: WeightTable,
}

/// Coarse pass, footprint carving and fine pass run in sequence
pub struct FootprintPipeline {
    coarse: SolverPass,
    fine: Option<SolverPass>,
    fine_rules: FineRules,
    plan: FootprintPlan,
    config: SolverConfig,
}

impl FootprintPipeline {
    /// Chain a prepared coarse pass to a fine rule set
    ///
    /// # Errors
    ///
    /// Returns an error if the coarse pass is not planar or the factor or
    /// height is zero
    pub fn new(
        coarse: SolverPass,
        fine_rules: FineRules,
        plan: FootprintPlan,
        config: SolverConfig,
    ) -> Result<Self> {
        if coarse.grid().dimensions()[2] != 1 {
            return Err(invalid_parameter(
                "coarse",
                &format!("{:?}", coarse.grid().dimensions()),
                &"coarse pass must be planar",
            ));
        }
        if plan.factor == 0 || plan.height == 0 {
            return Err(invalid_parameter(
                "plan",
                &format!("factor {} height {}", plan.factor, plan.height),
                &"factor and height must be positive",
            ));
        }
        Ok(Self {
            coarse,
            fine: None,
            fine_rules,
            plan,
            config,
        })
    }

    /// Coarse pass
    pub const fn coarse(&self) -> &SolverPass {
        &self.coarse
    }

    /// Fine pass, once the coarse pass has been solved
    pub const fn fine(&self) -> Option<&SolverPass> {
        self.fine.as_ref()
    }

    /// Advance whichever pass is active
    ///
    /// The fine pass is built on the first tick after the coarse pass is
    /// solved.
    ///
    /// # Errors
    ///
    /// Returns an error if the fine grid cannot be seeded
    pub fn tick(&mut self, observer: &mut dyn CollapseObserver) -> Result<PipelineTick> {
        if let Some(fine) = self.fine.as_mut() {
            return Ok(PipelineTick::Fine(fine.tick(observer)));
        }
        if self.coarse.state() != PassState::Solved {
            return Ok(PipelineTick::Coarse(self.coarse.tick(observer)));
        }
        let fine = self.build_fine_pass()?;
        let fine = self.fine.insert(fine);
        Ok(PipelineTick::Fine(fine.tick(observer)))
    }

    /// Run both passes to completion
    ///
    /// # Errors
    ///
    /// Returns an error if either pass aborts or does not finish within
    /// `max_ticks` ticks
    pub fn run(&mut self, max_ticks: usize, observer: &mut dyn CollapseObserver) -> Result<&Grid> {
        let coarse_state = self.coarse.run(max_ticks, observer)?;
        if coarse_state != PassState::Solved {
            return Err(unfinished("coarse", max_ticks));
        }
        if self.fine.is_none() {
            self.fine = Some(self.build_fine_pass()?);
        }
        let Some(fine) = self.fine.as_mut() else {
            return Err(unfinished("fine", max_ticks));
        };
        if fine.run(max_ticks, observer)? != PassState::Solved {
            return Err(unfinished("fine", max_ticks));
        }
        Ok(fine.grid())
    }

    fn build_fine_pass(&self) -> Result<SolverPass> {
        let blocked = self.coarse.catalog().domain_of(&self.plan.blocked)?;
        let occupancy = occupancy_from_grid(self.coarse.grid(), &blocked);
        let mask = footprint_mask(&occupancy, self.plan.factor)
            .ok_or_else(|| invalid_parameter("factor", &self.plan.factor, &"must be positive"))?;
        let grid = seed_fine_grid(&mask, self.plan.height, &self.fine_rules.catalog, &self.plan)?;
        SolverPass::new(
            grid,
            self.fine_rules.catalog.clone(),
            &self.fine_rules.rules,
            &self.fine_rules.weights,
            self.config,
        )
    }
}

fn unfinished(pass: &str, max_ticks: usize) -> SolverError {
    SolverError::InvalidSourceData {
        reason: format!("{pass} pass not solved within {max_ticks} ticks"),
    }
}
