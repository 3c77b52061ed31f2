//! Progress display for solver passes

use crate::algorithm::executor::SolverStats;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows one bar per solver pass, counting collapsed cells
///
/// The bar's message carries backtrack and restart counts, so a pass that
/// keeps rolling back is visible even when the cell count stalls.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bars: Vec::new(),
        }
    }

    /// Add a bar for a pass over `total_cells` cells, returning its index
    pub fn start_pass(&mut self, name: &str, total_cells: usize) -> usize {
        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(name.to_string());
        self.bars.push(self.multi_progress.add(bar));
        self.bars.len() - 1
    }

    /// Report the collapsed cell count and work counters of a pass
    pub fn update(&self, pass: usize, collapsed: usize, stats: &SolverStats) {
        if let Some(bar) = self.bars.get(pass) {
            bar.set_position(collapsed as u64);
            bar.set_message(Self::describe(stats));
        }
    }

    /// Mark a pass as done
    pub fn finish_pass(&self, pass: usize, stats: &SolverStats) {
        if let Some(bar) = self.bars.get(pass) {
            bar.finish_with_message(format!("✓ {}", Self::describe(stats)));
        }
    }

    /// Number of bars created so far
    pub fn pass_count(&self) -> usize {
        self.bars.len()
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }

    /// Counter summary shown next to a bar
    pub fn describe(stats: &SolverStats) -> String {
        format!(
            "ticks {} backtracks {} restarts {}",
            stats.ticks, stats.backtracks, stats.restarts
        )
    }
}
