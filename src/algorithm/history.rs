//! State signatures, known-bad states and the collapse history

use crate::algorithm::bitset::Domain;
use crate::io::configuration::{SIGNATURE_SEPARATOR, UNCOLLAPSED_MARK};
use crate::io::error::{Result, malformed_signature};
use crate::spatial::grid::{Grid, Position};
use std::collections::HashSet;
use std::fmt;

/// Compact record of which label every cell holds
///
/// Cells appear in grid order, each as its catalog index or `x` when
/// uncollapsed, joined by `-`. Two grids with equal signatures propagate to
/// equal domains, which is what makes signatures usable as backtrack points.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateSignature(String);

impl StateSignature {
    /// Record the current grid state
    pub fn capture(grid: &Grid) -> Self {
        let parts: Vec<String> = grid
            .cells()
            .map(|cell| {
                cell.chosen
                    .map_or_else(|| UNCOLLAPSED_MARK.to_string(), |index| index.to_string())
            })
            .collect();
        Self(parts.join(&SIGNATURE_SEPARATOR.to_string()))
    }

    /// Wrap an already encoded signature
    pub const fn from_encoded(encoded: String) -> Self {
        Self(encoded)
    }

    /// Encoded form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into one entry per cell in grid order
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is neither the uncollapsed mark nor a
    /// catalog index below `catalog_size`
    pub fn decode(&self, catalog_size: usize) -> Result<Vec<Option<usize>>> {
        self.0
            .split(SIGNATURE_SEPARATOR)
            .map(|part| {
                if part == UNCOLLAPSED_MARK {
                    return Ok(None);
                }
                let index: usize = part
                    .parse()
                    .map_err(|_parse_error| malformed_signature(&format!("bad entry '{part}'")))?;
                if index >= catalog_size {
                    return Err(malformed_signature(&format!(
                        "index {index} beyond catalog of {catalog_size}"
                    )));
                }
                Ok(Some(index))
            })
            .collect()
    }

    /// Put every non-fixed cell back into the recorded state
    ///
    /// Collapsed entries get a single-label domain; uncollapsed entries get
    /// their full own catalog back. Domains are rebuilt by the next
    /// propagation. Fixed cells keep their label.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature does not match the grid's cell count
    /// or names a label outside a cell's own catalog
    pub fn restore(&self, grid: &mut Grid) -> Result<()> {
        let catalog_size = grid.catalog_size();
        let entries = self.decode(catalog_size)?;
        if entries.len() != grid.len() {
            return Err(malformed_signature(&format!(
                "{} entries for a grid of {} cells",
                entries.len(),
                grid.len()
            )));
        }

        for (cell, entry) in grid.cells_mut().zip(entries) {
            if cell.fixed {
                continue;
            }
            match entry {
                Some(index) => {
                    if !cell.permitted.contains(index) {
                        return Err(malformed_signature(&format!(
                            "index {index} not permitted at {:?}",
                            cell.position
                        )));
                    }
                    cell.chosen = Some(index);
                    cell.domain = Domain::from_indices(&[index], catalog_size);
                }
                None => {
                    cell.chosen = None;
                    cell.domain = cell.permitted.clone();
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for StateSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signatures known to lead to a contradiction
#[derive(Clone, Debug, Default)]
pub struct BadStates {
    signatures: HashSet<StateSignature>,
}

impl BadStates {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a signature as bad, returning false if already known
    pub fn insert(&mut self, signature: StateSignature) -> bool {
        self.signatures.insert(signature)
    }

    /// Test whether a signature is known to be bad
    pub fn contains(&self, signature: &StateSignature) -> bool {
        self.signatures.contains(signature)
    }

    /// Number of known bad signatures
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Test if no signature is known to be bad
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

/// One successful collapse
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Grid state just before the collapse
    pub signature: StateSignature,
    /// Collapsed cell
    pub position: Position,
    /// Chosen catalog index
    pub label: usize,
}

/// Ordered log of successful collapses
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Test if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at an index
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Index of the newest entry next to `position` whose cell is still collapsed
    pub fn last_adjacent(&self, position: Position, grid: &Grid) -> Option<usize> {
        self.entries.iter().rposition(|entry| {
            grid.are_adjacent(entry.position, position) && is_still_collapsed(grid, entry)
        })
    }

    /// Index of the newest entry whose cell is still collapsed
    pub fn last_collapsed(&self, grid: &Grid) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|entry| is_still_collapsed(grid, entry))
    }

    /// Drop the entry at `index` and everything after it
    pub fn truncate(&mut self, index: usize) {
        self.entries.truncate(index);
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn is_still_collapsed(grid: &Grid, entry: &HistoryEntry) -> bool {
    grid.cell(entry.position)
        .is_some_and(|cell| cell.chosen == Some(entry.label))
}
