//! Module labels, label catalogs and collapse weights

use crate::algorithm::bitset::Domain;
use crate::io::error::{Result, invalid_parameter, unknown_label};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Quarter-turn orientation of a module around the vertical axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Rotation(u8);

impl Rotation {
    /// Unrotated orientation
    pub const IDENTITY: Self = Self(0);

    /// Create a rotation from a quarter-turn count, wrapping modulo four
    pub const fn new(quarter_turns: u8) -> Self {
        Self(quarter_turns % 4)
    }

    /// Number of quarter turns in `0..=3`
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    /// Compose with further quarter turns
    #[must_use]
    pub const fn add(self, quarter_turns: u8) -> Self {
        Self::new(self.0 + quarter_turns % 4)
    }

    /// Quarter turns needed to go from `self` to `target`
    pub const fn steps_to(self, target: Self) -> u8 {
        (target.0 + 4 - self.0) % 4
    }
}

impl From<u8> for Rotation {
    fn from(quarter_turns: u8) -> Self {
        Self::new(quarter_turns)
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation.0
    }
}

/// Identifier of one module variant
///
/// The orientation is a structured field rather than a suffix of the name,
/// so labels never need to be parsed to recover their rotation.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Base module name shared by all orientations
    pub base: String,
    /// Orientation of this variant
    #[serde(default)]
    pub rotation: Rotation,
}

impl Label {
    /// Create an unrotated label
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            rotation: Rotation::IDENTITY,
        }
    }

    /// Create a label with an explicit orientation
    pub fn rotated(base: impl Into<String>, rotation: Rotation) -> Self {
        Self {
            base: base.into(),
            rotation,
        }
    }

    /// Same base turned by further quarter turns
    #[must_use]
    pub fn turned(&self, quarter_turns: u8) -> Self {
        Self {
            base: self.base.clone(),
            rotation: self.rotation.add(quarter_turns),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rotation == Rotation::IDENTITY {
            write!(f, "{}", self.base)
        } else {
            write!(f, "{}@{}", self.base, self.rotation.quarter_turns())
        }
    }
}

/// Ordered set of unique labels
///
/// The position of a label in the catalog is the index the solver works
/// with internally and the value written into state signatures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    labels: Vec<Label>,
    indices: HashMap<Label, usize>,
}

impl Catalog {
    /// Build a catalog keeping the first occurrence of each label
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Self {
        let mut catalog = Self::default();
        for label in labels {
            catalog.push(label);
        }
        catalog
    }

    /// Append a label if not already present, returning its index
    pub fn push(&mut self, label: Label) -> usize {
        if let Some(&index) = self.indices.get(&label) {
            return index;
        }
        let index = self.labels.len();
        self.indices.insert(label.clone(), index);
        self.labels.push(label);
        index
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Test if the catalog has no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Catalog index of a label
    pub fn index_of(&self, label: &Label) -> Option<usize> {
        self.indices.get(label).copied()
    }

    /// Catalog index of a label, failing for unknown labels
    ///
    /// # Errors
    ///
    /// Returns an error if the label is not in the catalog
    pub fn require(&self, label: &Label) -> Result<usize> {
        self.index_of(label).ok_or_else(|| unknown_label(label))
    }

    /// Label stored at a catalog index
    pub fn label(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// All labels in catalog order
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Domain containing exactly the given labels
    ///
    /// # Errors
    ///
    /// Returns an error if any label is not in the catalog
    pub fn domain_of(&self, labels: &[Label]) -> Result<Domain> {
        let mut domain = Domain::new(self.len());
        for label in labels {
            domain.insert(self.require(label)?);
        }
        Ok(domain)
    }
}

/// Relative collapse weight per label
///
/// Labels without an entry weigh 1.0, which makes collapse uniform.
#[derive(Clone, Debug, Default)]
pub struct WeightTable {
    weights: HashMap<Label, f64>,
}

impl WeightTable {
    /// Create an empty table where every label weighs 1.0
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of a label
    ///
    /// # Errors
    ///
    /// Returns an error if the weight is not a positive finite number
    pub fn set(&mut self, label: Label, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(invalid_parameter(
                "weight",
                &weight,
                &format!("weight of '{label}' must be positive and finite"),
            ));
        }
        self.weights.insert(label, weight);
        Ok(())
    }

    /// Weight of a label
    pub fn get(&self, label: &Label) -> f64 {
        self.weights.get(label).copied().unwrap_or(1.0)
    }

    /// Weights aligned with catalog indices
    pub fn for_catalog(&self, catalog: &Catalog) -> Vec<f64> {
        catalog.labels().iter().map(|label| self.get(label)).collect()
    }

    /// Explicitly weighted labels
    pub fn iter(&self) -> impl Iterator<Item = (&Label, f64)> {
        self.weights.iter().map(|(label, &weight)| (label, weight))
    }
}
