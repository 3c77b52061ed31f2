//! Command-line interface for solving grids from rule documents or samples

use crate::algorithm::collapse::BiasLayer;
use crate::algorithm::executor::{
    BacktrackPolicy, CollapseObserver, NullObserver, PassState, SolverConfig, SolverPass,
    TickOutcome,
};
use crate::algorithm::pipeline::{FineRules, FootprintPipeline, FootprintPlan, PipelineTick};
use crate::algorithm::selection::{EntropyMode, TieBreak};
use crate::io::configuration::{
    DEFAULT_BIAS_STRENGTH, DEFAULT_CELL_SIZE, DEFAULT_FINE_HEIGHT, DEFAULT_HEIGHT,
    DEFAULT_MAX_RESTARTS, DEFAULT_MAX_TICKS, DEFAULT_SEED, DEFAULT_TILE_SIZE, DEFAULT_VALUE_RANGE,
    DEFAULT_VOID_LABEL, DEFAULT_WIDTH, FOOTPRINT_SUFFIX, GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX,
    PROGRESS_REFRESH_TICKS, SPLATMAP_SQUARE_SIZE, SPLATMAP_SUFFIX, SUBDIVISION_FACTOR,
    VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::io::image::{export_grid_as_png, label_color};
use crate::io::persistence::{GridDocument, RuleDocument, load_rule_set, save_json, save_rule_document};
use crate::io::progress::ProgressManager;
use crate::io::splatmap::export_splatmap;
use crate::io::visualization::VisualizationCapture;
use crate::math::fields::ValueField;
use crate::rules::catalog::Label;
use crate::rules::sample::load_sample;
use crate::rules::table::RuleSet;
use crate::spatial::grid::{Grid, Topology};
use clap::{Parser, ValueEnum};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Rollback target on dead ends
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BacktrackArg {
    /// Newest collapse next to the dead end
    Adjacent,
    /// Newest collapse anywhere
    Recent,
}

/// Value field used to steer collapse
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BiasArg {
    /// Bands from left to right
    Horizontal,
    /// Rings around the centre
    Radial,
    /// Randomly grown regions
    Regions,
}

#[derive(Parser)]
#[command(name = "modulewfc")]
#[command(
    author,
    version,
    about = "Fill grids with modules using wave function collapse"
)]
/// Command-line arguments for the solver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Rule document (.json) or sample image (.png)
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum ticks before stopping
    #[arg(short, long, default_value_t = DEFAULT_MAX_TICKS)]
    pub ticks: usize,

    /// Grid width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Grid depth in cells; makes the grid volumetric
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Edge length of sample tiles in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Restarts allowed before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_RESTARTS)]
    pub max_restarts: usize,

    /// Score cells by weighted entropy instead of candidate count
    #[arg(long)]
    pub weighted_entropy: bool,

    /// Take the first tied cell instead of a random one
    #[arg(long)]
    pub first_candidate: bool,

    /// Rollback target on dead ends
    #[arg(long, value_enum, default_value_t = BacktrackArg::Adjacent)]
    pub backtrack: BacktrackArg,

    /// Restrict boundary cells to these labels (repeatable)
    #[arg(short, long)]
    pub edge_label: Vec<String>,

    /// Steer collapse with a value field
    #[arg(short, long, value_enum)]
    pub bias: Option<BiasArg>,

    /// Weight multiplier for labels matching the field
    #[arg(long, default_value_t = DEFAULT_BIAS_STRENGTH)]
    pub bias_strength: f64,

    /// Number of distinct field values
    #[arg(long, default_value_t = DEFAULT_VALUE_RANGE)]
    pub value_range: u32,

    /// Pixel size of a cell when rendering label colours
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: usize,

    /// Fine rule document; fills the enclosed open areas of the result with a volumetric pass
    #[arg(long, value_name = "FINE_RULES")]
    pub footprint: Option<PathBuf>,

    /// Labels that count as walls when carving the footprint (repeatable)
    #[arg(long)]
    pub wall: Vec<String>,

    /// Fine cells per coarse cell along each horizontal axis
    #[arg(long, default_value_t = SUBDIVISION_FACTOR)]
    pub factor: usize,

    /// Fine layers stacked on the footprint
    #[arg(long, default_value_t = DEFAULT_FINE_HEIGHT)]
    pub fine_height: usize,

    /// Fine label fixed outside the footprint
    #[arg(long, default_value = DEFAULT_VOID_LABEL)]
    pub void_label: String,

    /// Fine label fixed on the bottom layer of the footprint
    #[arg(long)]
    pub floor_label: Option<String>,

    /// Fine label fixed on the top layer of the footprint
    #[arg(long)]
    pub roof_label: Option<String>,

    /// Write the resolved rules as JSON to this path
    #[arg(long)]
    pub save_rules: Option<PathBuf>,

    /// Export a splatmap of label values
    #[arg(long)]
    pub splatmap: bool,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Solver configuration described by the flags
    pub const fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            entropy: if self.weighted_entropy {
                EntropyMode::Weighted
            } else {
                EntropyMode::Count
            },
            tie_break: if self.first_candidate {
                TieBreak::First
            } else {
                TieBreak::Random
            },
            backtrack: match self.backtrack {
                BacktrackArg::Adjacent => BacktrackPolicy::Adjacent,
                BacktrackArg::Recent => BacktrackPolicy::MostRecent,
            },
            max_restarts: self.max_restarts,
            seed: self.seed,
        }
    }

    /// How the solved grid is carved into the fine grid
    pub fn footprint_plan(&self) -> FootprintPlan {
        FootprintPlan {
            factor: self.factor,
            height: self.fine_height,
            blocked: self.wall.iter().map(Label::new).collect(),
            void: Label::new(&self.void_label),
            floor: self.floor_label.as_ref().map(Label::new),
            roof: self.roof_label.as_ref().map(Label::new),
        }
    }

    /// Grid connectivity described by the flags
    pub const fn topology(&self) -> Topology {
        if self.depth.is_some() {
            Topology::Volumetric
        } else {
            Topology::Planar
        }
    }
}

/// Loads rules, runs the solver passes and writes the outputs
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Load the target, solve and export
    ///
    /// With a footprint rule document the solved grid is carved and a second
    /// volumetric pass fills its enclosed areas.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be loaded, the grid cannot be
    /// built, a pass aborts or an output cannot be written
    // Allow print for user feedback on rule and budget warnings
    #[allow(clippy::print_stderr)]
    pub fn process(&mut self) -> Result<()> {
        let rule_set = self.load_rules()?;

        if let Some(ref path) = self.cli.save_rules {
            save_rule_document(&RuleDocument::from_rule_set(&rule_set), path)?;
        }

        let asymmetric = rule_set.rules.asymmetric_entries();
        if !asymmetric.is_empty() && !self.cli.quiet {
            eprintln!(
                "Warning: {} rule entries have no reverse entry",
                asymmetric.len()
            );
        }

        let grid = self.build_grid(&rule_set)?;
        let [width, height, _] = grid.dimensions();
        let pass = SolverPass::new(
            grid,
            rule_set.catalog.clone(),
            &rule_set.rules,
            &rule_set.weights,
            self.cli.solver_config(),
        )?;
        let mut pass = self.apply_bias(pass, &rule_set, width, height);

        let mut capture = self.cli.visualize.then(|| {
            let colors: HashMap<Label, [u8; 4]> = rule_set
                .catalog
                .labels()
                .iter()
                .enumerate()
                .map(|(index, label)| {
                    (label.clone(), label_color(&rule_set, &rule_set.catalog, index))
                })
                .collect();
            VisualizationCapture::new(width, height, colors)
        });

        if let Some(fine_path) = self.cli.footprint.clone() {
            let RuleSet {
                catalog,
                rules,
                weights,
                ..
            } = load_rule_set(&fine_path)?;
            let mut pipeline = FootprintPipeline::new(
                pass,
                FineRules {
                    catalog,
                    rules,
                    weights,
                },
                self.cli.footprint_plan(),
                self.cli.solver_config(),
            )?;

            let state = self.drive_pipeline(&mut pipeline, capture.as_mut())?;
            self.warn_if_unfinished(state);

            self.export(pipeline.coarse(), &rule_set)?;
            if let Some(fine) = pipeline.fine() {
                save_json(
                    &GridDocument::from_grid(fine.grid(), fine.catalog()),
                    Self::get_sibling_path(&self.cli.target, FOOTPRINT_SUFFIX, "json"),
                )?;
            }
        } else {
            let mut null = NullObserver;
            let observer: &mut dyn CollapseObserver = match capture.as_mut() {
                Some(capture) => capture,
                None => &mut null,
            };

            let state = self.drive(&mut pass, observer)?;
            self.warn_if_unfinished(state);

            self.export(&pass, &rule_set)?;
        }

        if let Some(capture) = capture {
            let path = Self::get_sibling_path(&self.cli.target, VISUALIZATION_SUFFIX, "gif");
            capture.export_gif(path, GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    // Allow print for user feedback on bias warnings
    #[allow(clippy::print_stderr)]
    fn apply_bias(
        &self,
        pass: SolverPass,
        rule_set: &RuleSet,
        width: usize,
        height: usize,
    ) -> SolverPass {
        let Some(bias) = self.cli.bias else {
            return pass;
        };
        let label_values = rule_set.values_for_catalog();
        if label_values.iter().all(Option::is_none) && !self.cli.quiet {
            eprintln!("Warning: no label carries a value, bias has no effect");
        }
        let field = match bias {
            BiasArg::Horizontal => ValueField::Horizontal,
            BiasArg::Radial => ValueField::Radial,
            BiasArg::Regions => ValueField::GrowingRegions {
                seed: self.cli.seed,
            },
        };
        pass.with_bias(BiasLayer {
            cell_values: field.generate(width, height, self.cli.value_range),
            label_values,
            strength: self.cli.bias_strength,
        })
    }

    // Allow print for user feedback on budget warnings
    #[allow(clippy::print_stderr)]
    fn warn_if_unfinished(&self, state: PassState) {
        if state == PassState::Running && !self.cli.quiet {
            eprintln!(
                "Warning: tick budget of {} spent, exporting partial result",
                self.cli.ticks
            );
        }
    }

    fn load_rules(&self) -> Result<RuleSet> {
        match self.cli.target.extension().and_then(|s| s.to_str()) {
            Some("json") => load_rule_set(&self.cli.target),
            Some("png") => load_sample(&self.cli.target, self.cli.tile_size),
            _ => Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a .json rule document or a .png sample",
            )),
        }
    }

    fn build_grid(&self, rule_set: &RuleSet) -> Result<Grid> {
        let size = rule_set.catalog.len();
        let mut grid = match self.cli.depth {
            Some(depth) => Grid::volumetric(self.cli.width, self.cli.height, depth, size)?,
            None => Grid::planar(self.cli.width, self.cli.height, size)?,
        };

        if !self.cli.edge_label.is_empty() {
            let labels: Vec<Label> = self.cli.edge_label.iter().map(Label::new).collect();
            let edge = rule_set.catalog.domain_of(&labels)?;
            grid.restrict_boundary(&edge);
        }

        Ok(grid)
    }

    fn drive(
        &mut self,
        pass: &mut SolverPass,
        observer: &mut dyn CollapseObserver,
    ) -> Result<PassState> {
        let total = pass.grid().len();
        let bar = self
            .progress_manager
            .as_mut()
            .map(|pm| pm.start_pass("solve", total));

        for tick in 0..self.cli.ticks {
            let outcome = pass.tick(observer);

            if tick % PROGRESS_REFRESH_TICKS == 0 {
                self.report(bar, pass);
            }

            match outcome {
                TickOutcome::Solved => break,
                TickOutcome::Aborted => {
                    return Err(pass.take_failure().unwrap_or_else(|| aborted(pass)));
                }
                _ => {}
            }
        }

        self.report(bar, pass);
        self.finish_bar(bar, pass);

        Ok(pass.state())
    }

    // The capture only follows the coarse pass, whose grid it was sized for
    fn drive_pipeline(
        &mut self,
        pipeline: &mut FootprintPipeline,
        mut capture: Option<&mut VisualizationCapture>,
    ) -> Result<PassState> {
        let total = pipeline.coarse().grid().len();
        let coarse_bar = self
            .progress_manager
            .as_mut()
            .map(|pm| pm.start_pass("coarse", total));
        let mut fine_bar = None;
        let mut fine_started = false;
        let mut null = NullObserver;

        for tick in 0..self.cli.ticks {
            let observer: &mut dyn CollapseObserver = match capture.as_deref_mut() {
                Some(capture) if pipeline.coarse().state() != PassState::Solved => capture,
                _ => &mut null,
            };
            let outcome = pipeline.tick(observer)?;

            if !fine_started {
                if let Some(fine) = pipeline.fine() {
                    fine_started = true;
                    self.report(coarse_bar, pipeline.coarse());
                    self.finish_bar(coarse_bar, pipeline.coarse());
                    let total = fine.grid().len();
                    fine_bar = self
                        .progress_manager
                        .as_mut()
                        .map(|pm| pm.start_pass("fine", total));
                }
            }

            if tick % PROGRESS_REFRESH_TICKS == 0 {
                match pipeline.fine() {
                    Some(fine) => self.report(fine_bar, fine),
                    None => self.report(coarse_bar, pipeline.coarse()),
                }
            }

            match outcome {
                PipelineTick::Coarse(TickOutcome::Aborted) => {
                    return Err(aborted(pipeline.coarse()));
                }
                PipelineTick::Fine(TickOutcome::Aborted) => {
                    return Err(pipeline.fine().map_or_else(|| aborted(pipeline.coarse()), aborted));
                }
                PipelineTick::Fine(TickOutcome::Solved) => break,
                _ => {}
            }
        }

        match pipeline.fine() {
            Some(fine) => {
                self.report(fine_bar, fine);
                self.finish_bar(fine_bar, fine);
                Ok(fine.state())
            }
            None => {
                self.report(coarse_bar, pipeline.coarse());
                Ok(PassState::Running)
            }
        }
    }

    fn report(&self, bar: Option<usize>, pass: &SolverPass) {
        if let (Some(pm), Some(bar)) = (self.progress_manager.as_ref(), bar) {
            pm.update(bar, pass.grid().collapsed_count(), &pass.stats());
        }
    }

    fn finish_bar(&self, bar: Option<usize>, pass: &SolverPass) {
        if let (Some(pm), Some(bar)) = (self.progress_manager.as_ref(), bar) {
            pm.finish_pass(bar, &pass.stats());
        }
    }

    fn export(&self, pass: &SolverPass, rule_set: &RuleSet) -> Result<()> {
        let grid = pass.grid();
        match grid.topology() {
            Topology::Planar => export_grid_as_png(
                grid,
                pass.catalog(),
                rule_set,
                self.cli.cell_size,
                Self::get_sibling_path(&self.cli.target, OUTPUT_SUFFIX, "png"),
            )?,
            Topology::Volumetric => save_json(
                &GridDocument::from_grid(grid, pass.catalog()),
                Self::get_sibling_path(&self.cli.target, OUTPUT_SUFFIX, "json"),
            )?,
        }

        if self.cli.splatmap {
            export_splatmap(
                grid,
                &rule_set.values_for_catalog(),
                SPLATMAP_SQUARE_SIZE,
                Self::get_sibling_path(&self.cli.target, SPLATMAP_SUFFIX, "png"),
            )?;
        }

        Ok(())
    }

    /// Output path next to the input, with a suffix and new extension
    pub fn get_sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}

fn aborted(pass: &SolverPass) -> SolverError {
    SolverError::PassAborted {
        restarts: pass.stats().restarts,
        ticks: pass.stats().ticks,
    }
}
