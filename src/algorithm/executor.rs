//! Step-driven solver pass with history-based backtracking
//!
//! A pass owns its grid and advances one decision per [`SolverPass::tick`]:
//! pick the most constrained cell, draw a label, check the resulting state
//! against the known-bad set, record it and propagate. A cell that runs out of
//! labels triggers a rollback to an earlier collapse, and when no rollback
//! target is left the pass restarts from its initial grid, up to a fixed
//! number of times.

use crate::algorithm::collapse::{
    BiasLayer, CollapsePolicy, RandomSelector, collapse, reject, reset_cell,
};
use crate::algorithm::history::{BadStates, History, HistoryEntry, StateSignature};
use crate::algorithm::propagation::{PropagationSummary, refresh};
use crate::algorithm::selection::{EntropyMode, TieBreak, lowest_entropy_cells};
use crate::io::configuration::{DEFAULT_MAX_RESTARTS, DEFAULT_SEED};
use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::rules::catalog::{Catalog, Label, WeightTable};
use crate::rules::table::{CompiledRules, RuleTable};
use crate::spatial::grid::{Grid, Position};

/// Which earlier collapse a dead end rolls back to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BacktrackPolicy {
    /// Newest collapse that touches the exhausted cell
    #[default]
    Adjacent,
    /// Newest collapse anywhere in the grid
    MostRecent,
}

/// Parameters of a solver pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Cell scoring
    pub entropy: EntropyMode,
    /// Choice among equally scored cells
    pub tie_break: TieBreak,
    /// Rollback target on dead ends
    pub backtrack: BacktrackPolicy,
    /// Restarts allowed before the pass aborts
    pub max_restarts: usize,
    /// Seed for every random decision of the pass
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            entropy: EntropyMode::default(),
            tie_break: TieBreak::default(),
            backtrack: BacktrackPolicy::default(),
            max_restarts: DEFAULT_MAX_RESTARTS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Lifecycle state of a pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassState {
    /// More decisions are needed
    Running,
    /// Every cell holds a label
    Solved,
    /// The restart budget ran out
    Aborted,
}

/// What one tick did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A cell was collapsed
    Collapsed {
        /// Collapsed cell
        position: Position,
        /// Chosen catalog index
        label: usize,
    },
    /// A cell ran out of labels and the grid was rolled back
    Backtracked {
        /// Exhausted cell
        position: Position,
    },
    /// No rollback target was left and the grid was reset
    Restarted,
    /// Nothing to do this tick
    Idle,
    /// The grid is complete
    Solved,
    /// The pass gave up
    Aborted,
}

/// Counters describing the work a pass has done
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Ticks executed
    pub ticks: usize,
    /// Collapses committed to history
    pub collapses: usize,
    /// Draws discarded because they produced a known-bad state
    pub rejections: usize,
    /// Rollbacks to an earlier collapse
    pub backtracks: usize,
    /// Full resets to the initial grid
    pub restarts: usize,
}

/// Receives cell changes for rendering
///
/// Called at the end of each tick, at most once per change, and only for
/// cells whose label differs from what was last reported.
pub trait CollapseObserver {
    /// A cell now shows `label`
    fn on_collapse(&mut self, position: Position, label: &Label);

    /// A cell no longer shows a label
    fn on_reset(&mut self, position: Position);
}

/// Observer that ignores every notification
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl CollapseObserver for NullObserver {
    fn on_collapse(&mut self, _position: Position, _label: &Label) {}

    fn on_reset(&mut self, _position: Position) {}
}

/// One wave function collapse run over a single grid
pub struct SolverPass {
    grid: Grid,
    template: Grid,
    catalog: Catalog,
    rules: CompiledRules,
    policy: CollapsePolicy,
    config: SolverConfig,
    selector: RandomSelector,
    history: History,
    bad_states: BadStates,
    state: PassState,
    stats: SolverStats,
    failure: Option<SolverError>,
}

impl SolverPass {
    /// Prepare a pass over `grid`
    ///
    /// The grid's current contents, including fixed cells and restricted
    /// catalogs, become the state every restart returns to.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty or the grid was built for a
    /// different catalog size
    pub fn new(
        grid: Grid,
        catalog: Catalog,
        rules: &RuleTable,
        weights: &WeightTable,
        config: SolverConfig,
    ) -> Result<Self> {
        if catalog.is_empty() {
            return Err(invalid_parameter(
                "catalog",
                &0,
                &"at least one label is required",
            ));
        }
        if grid.catalog_size() != catalog.len() {
            return Err(invalid_parameter(
                "grid",
                &grid.catalog_size(),
                &format!("grid built for a catalog of {}", catalog.len()),
            ));
        }

        let compiled = rules.compile(&catalog);
        let policy = CollapsePolicy::new(weights.for_catalog(&catalog));
        let mut grid = grid;
        refresh(&mut grid, &compiled);

        Ok(Self {
            template: grid.clone(),
            grid,
            catalog,
            rules: compiled,
            policy,
            config,
            selector: RandomSelector::new(config.seed),
            history: History::new(),
            bad_states: BadStates::new(),
            state: PassState::Running,
            stats: SolverStats::default(),
            failure: None,
        })
    }

    /// Steer collapse with a value field
    #[must_use]
    pub fn with_bias(mut self, bias: BiasLayer) -> Self {
        self.policy.bias = Some(bias);
        self
    }

    /// Seed a cell with a label that survives backtracking and restarts
    ///
    /// # Errors
    ///
    /// Returns an error if the label is unknown, the position is out of
    /// bounds or the label lies outside the cell's own catalog
    pub fn fix_cell(&mut self, position: Position, label: &Label) -> Result<()> {
        let index = self.catalog.require(label)?;
        self.grid.fix(position, index).map_err(|e| match e {
            SolverError::LabelNotPermitted { position, .. } => SolverError::LabelNotPermitted {
                label: label.to_string(),
                position,
            },
            other => other,
        })?;
        self.template.fix(position, index)?;
        refresh(&mut self.template, &self.rules);
        self.propagate();
        Ok(())
    }

    /// Current grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Label catalog of the pass
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Lifecycle state
    pub const fn state(&self) -> PassState {
        self.state
    }

    /// Work counters
    pub const fn stats(&self) -> SolverStats {
        self.stats
    }

    /// Collapse log since the last restart
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Signatures known to fail
    pub const fn bad_states(&self) -> &BadStates {
        &self.bad_states
    }

    /// Take the error that stopped the pass, if it was not a spent restart budget
    pub fn take_failure(&mut self) -> Option<SolverError> {
        self.failure.take()
    }

    /// Label chosen at a position, if collapsed
    pub fn label_at(&self, position: Position) -> Option<&Label> {
        self.grid
            .cell(position)
            .and_then(|cell| cell.chosen)
            .and_then(|index| self.catalog.label(index))
    }

    /// Take the grid out of the pass
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Advance the pass by one decision
    pub fn tick(&mut self, observer: &mut dyn CollapseObserver) -> TickOutcome {
        match self.state {
            PassState::Solved => return TickOutcome::Solved,
            PassState::Aborted => return TickOutcome::Aborted,
            PassState::Running => {}
        }
        self.stats.ticks += 1;

        if self.grid.is_fully_collapsed() {
            self.state = PassState::Solved;
            self.sync_observer(observer);
            return TickOutcome::Solved;
        }

        let candidates =
            lowest_entropy_cells(&self.grid, self.config.entropy, &self.policy.weights);
        let position = match self.config.tie_break {
            TieBreak::First => candidates.first().copied(),
            TieBreak::Random => {
                let pick = self.selector.index(candidates.len());
                candidates.get(pick).copied()
            }
        };
        let Some(position) = position else {
            return TickOutcome::Idle;
        };

        let outcome = match self.attempt_collapse(position) {
            Some(label) => TickOutcome::Collapsed { position, label },
            None => self.backtrack(position),
        };

        self.propagate();
        self.sync_observer(observer);

        if self.state == PassState::Running && self.grid.is_fully_collapsed() {
            self.state = PassState::Solved;
        }
        outcome
    }

    /// Tick until solved, aborted or out of budget
    ///
    /// Returns the state reached; `Running` means the budget ran out.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::PassAborted`] when the restart budget runs out,
    /// or the error that stopped the pass
    pub fn run(
        &mut self,
        max_ticks: usize,
        observer: &mut dyn CollapseObserver,
    ) -> Result<PassState> {
        for _ in 0..max_ticks {
            if self.state != PassState::Running {
                break;
            }
            self.tick(observer);
        }

        match self.state {
            PassState::Aborted => Err(self.take_failure().unwrap_or(SolverError::PassAborted {
                restarts: self.stats.restarts,
                ticks: self.stats.ticks,
            })),
            state => Ok(state),
        }
    }

    /// Recompute domains of every open cell
    pub fn propagate(&mut self) -> PropagationSummary {
        refresh(&mut self.grid, &self.rules)
    }

    // Draw labels until one yields a state not known to be bad
    fn attempt_collapse(&mut self, position: Position) -> Option<usize> {
        let parent = StateSignature::capture(&self.grid);

        loop {
            let cell = self.grid.cell_mut(position)?;
            let label = collapse(cell, &self.policy, &mut self.selector)?;

            let signature = StateSignature::capture(&self.grid);
            if self.bad_states.contains(&signature) {
                if let Some(cell) = self.grid.cell_mut(position) {
                    reject(cell, label);
                }
                self.stats.rejections += 1;
                continue;
            }

            self.history.push(HistoryEntry {
                signature: parent,
                position,
                label,
            });
            self.stats.collapses += 1;
            return Some(label);
        }
    }

    fn backtrack(&mut self, exhausted: Position) -> TickOutcome {
        if let Some(cell) = self.grid.cell_mut(exhausted) {
            reset_cell(cell);
        }
        self.bad_states
            .insert(StateSignature::capture(&self.grid));

        let target = match self.config.backtrack {
            BacktrackPolicy::Adjacent => self.history.last_adjacent(exhausted, &self.grid),
            BacktrackPolicy::MostRecent => self.history.last_collapsed(&self.grid),
        };
        let Some((index, entry)) =
            target.and_then(|index| self.history.get(index).cloned().map(|e| (index, e)))
        else {
            return self.restart();
        };
        // History only holds signatures captured from this grid, so a failed
        // restore means the pass state is corrupt and must not be retried
        if let Err(error) = entry.signature.restore(&mut self.grid) {
            self.failure = Some(error);
            self.state = PassState::Aborted;
            return TickOutcome::Aborted;
        }

        for (_, next) in self.grid.neighbors(exhausted) {
            if let Some(cell) = self.grid.cell_mut(next) {
                reset_cell(cell);
            }
        }
        self.bad_states
            .insert(StateSignature::capture(&self.grid));
        self.history.truncate(index);
        self.stats.backtracks += 1;

        TickOutcome::Backtracked {
            position: exhausted,
        }
    }

    fn restart(&mut self) -> TickOutcome {
        if self.stats.restarts >= self.config.max_restarts {
            self.state = PassState::Aborted;
            return TickOutcome::Aborted;
        }
        self.stats.restarts += 1;

        let mut fresh = self.template.clone();
        for (cell, old) in fresh.cells_mut().zip(self.grid.cells()) {
            cell.displayed = old.displayed;
        }
        self.grid = fresh;
        self.history.clear();
        self.bad_states = BadStates::new();

        TickOutcome::Restarted
    }

    fn sync_observer(&mut self, observer: &mut dyn CollapseObserver) {
        for cell in self.grid.cells_mut() {
            match (cell.chosen, cell.displayed) {
                (Some(label), Some(shown)) if label != shown => {
                    observer.on_reset(cell.position);
                    if let Some(named) = self.catalog.label(label) {
                        observer.on_collapse(cell.position, named);
                    }
                }
                (Some(label), None) => {
                    if let Some(named) = self.catalog.label(label) {
                        observer.on_collapse(cell.position, named);
                    }
                }
                (None, Some(_)) => observer.on_reset(cell.position),
                _ => {}
            }
            cell.displayed = cell.chosen;
        }
    }
}
