//! Adjacency rule tables and their compiled per-index form

use crate::algorithm::bitset::Domain;
use crate::rules::catalog::{Catalog, Label, WeightTable};
use crate::rules::sample::TileArt;
use crate::spatial::grid::Direction;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Allowed neighbours per label and direction
///
/// `allowed(a, d)` lists the labels that may sit in the cell one step from
/// an `a` cell towards `d`. The table is read as given; asymmetric entries
/// are not repaired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleTable {
    entries: BTreeMap<Label, BTreeMap<Direction, BTreeSet<Label>>>,
}

impl RuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `neighbor` one step from `label` towards `direction`
    pub fn add(&mut self, label: Label, direction: Direction, neighbor: Label) {
        self.entries
            .entry(label)
            .or_default()
            .entry(direction)
            .or_default()
            .insert(neighbor);
    }

    /// Allow the pair in both directions
    pub fn add_symmetric(&mut self, label: Label, direction: Direction, neighbor: Label) {
        self.add(neighbor.clone(), direction.opposite(), label.clone());
        self.add(label, direction, neighbor);
    }

    /// Declare a direction for a label without allowing anything yet
    pub fn declare(&mut self, label: Label, direction: Direction) {
        self.entries.entry(label).or_default().entry(direction).or_default();
    }

    /// Labels allowed next to `label` towards `direction`
    pub fn allowed(&self, label: &Label, direction: Direction) -> Option<&BTreeSet<Label>> {
        self.entries.get(label).and_then(|directions| directions.get(&direction))
    }

    /// All directional entries of one label
    pub fn entry(&self, label: &Label) -> Option<&BTreeMap<Direction, BTreeSet<Label>>> {
        self.entries.get(label)
    }

    /// Iterate labels with their directional entries
    pub fn iter(&self) -> impl Iterator<Item = (&Label, &BTreeMap<Direction, BTreeSet<Label>>)> {
        self.entries.iter()
    }

    /// Number of labels with at least one entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Test if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge every entry of another table into this one
    pub fn extend(&mut self, other: &Self) {
        for (label, directions) in &other.entries {
            for (&direction, neighbors) in directions {
                let target = self
                    .entries
                    .entry(label.clone())
                    .or_default()
                    .entry(direction)
                    .or_default();
                target.extend(neighbors.iter().cloned());
            }
        }
    }

    /// Entries whose reverse entry is missing
    ///
    /// Each item is `(label, direction, neighbor)` where `neighbor` is
    /// allowed towards `direction` but `label` is not allowed back.
    pub fn asymmetric_entries(&self) -> Vec<(Label, Direction, Label)> {
        let mut missing = Vec::new();
        for (label, directions) in &self.entries {
            for (&direction, neighbors) in directions {
                for neighbor in neighbors {
                    let reverse = self
                        .allowed(neighbor, direction.opposite())
                        .is_some_and(|back| back.contains(label));
                    if !reverse {
                        missing.push((label.clone(), direction, neighbor.clone()));
                    }
                }
            }
        }
        missing
    }

    /// Resolve the table against a catalog
    ///
    /// Labels absent from the catalog are ignored. A label without an entry
    /// for a direction allows nothing there.
    pub fn compile(&self, catalog: &Catalog) -> CompiledRules {
        let size = catalog.len();
        let allowed: Vec<[Domain; 6]> = catalog
            .labels()
            .iter()
            .map(|label| {
                std::array::from_fn(|slot| {
                    let mut domain = Domain::new(size);
                    let direction = Direction::ALL.get(slot).copied();
                    if let Some(neighbors) = direction.and_then(|d| self.allowed(label, d)) {
                        for neighbor in neighbors {
                            if let Some(index) = catalog.index_of(neighbor) {
                                domain.insert(index);
                            }
                        }
                    }
                    domain
                })
            })
            .collect();

        CompiledRules {
            allowed,
            catalog_size: size,
        }
    }
}

/// Rule table resolved to catalog indices
///
/// Lookups cost one index and one array access, which keeps propagation
/// free of label hashing.
#[derive(Clone, Debug)]
pub struct CompiledRules {
    allowed: Vec<[Domain; 6]>,
    catalog_size: usize,
}

impl CompiledRules {
    /// Domain allowed next to a catalog index towards `direction`
    pub fn allowed(&self, index: usize, direction: Direction) -> Option<&Domain> {
        self.allowed
            .get(index)
            .and_then(|slots| slots.get(direction.index()))
    }

    /// Number of labels the rules were compiled for
    pub const fn catalog_size(&self) -> usize {
        self.catalog_size
    }
}

/// Everything ingestion produces for a solver run
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    /// Ordered label catalog
    pub catalog: Catalog,
    /// Adjacency rules
    pub rules: RuleTable,
    /// Collapse weights
    pub weights: WeightTable,
    /// Per-label values used by biased collapse and splatmaps
    pub values: HashMap<Label, u32>,
    /// Display colour per label
    pub colors: HashMap<Label, [u8; 4]>,
    /// Pixel art per label when the rules came from a sample image
    pub art: Option<TileArt>,
}

impl RuleSet {
    /// Value of a label, falling back to its unrotated base
    pub fn value_of(&self, label: &Label) -> Option<u32> {
        self.values
            .get(label)
            .or_else(|| self.values.get(&Label::new(label.base.clone())))
            .copied()
    }

    /// Values aligned with catalog indices
    pub fn values_for_catalog(&self) -> Vec<Option<u32>> {
        self.catalog
            .labels()
            .iter()
            .map(|label| self.value_of(label))
            .collect()
    }

    /// Colour of a label, falling back to its unrotated base
    pub fn color_of(&self, label: &Label) -> Option<[u8; 4]> {
        self.colors
            .get(label)
            .or_else(|| self.colors.get(&Label::new(label.base.clone())))
            .copied()
    }
}
