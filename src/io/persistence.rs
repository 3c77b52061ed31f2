//! JSON documents for rule sets and solved grids

use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::rules::catalog::{Catalog, Label, WeightTable};
use crate::rules::rotation::{Symmetry, expand_samples};
use crate::rules::table::{RuleSet, RuleTable};
use crate::spatial::grid::{Direction, Grid};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Allowed neighbours of one label towards one direction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionRecord {
    /// Direction from the label's cell
    pub direction: Direction,
    /// Labels allowed in that neighbour
    pub valid: Vec<Label>,
}

/// Every directional entry of one label
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Label the entry belongs to
    pub label: Label,
    /// One record per declared direction
    pub directions: Vec<DirectionRecord>,
}

/// Weight of one label
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    /// Weighted label
    pub label: Label,
    /// Positive relative weight
    pub weight: f64,
}

/// Value of one label for biased collapse and splatmaps
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRecord {
    /// Label carrying the value
    pub label: Label,
    /// Small integer value
    pub value: u32,
}

/// Display colour of one label
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
    /// Coloured label
    pub label: Label,
    /// RGBA colour
    pub color: [u8; 4],
}

/// Serialized rule set
///
/// `rules` are used as written. `samples` are oriented entries that are
/// expanded into all four rotations, honouring `symmetries`, and merged in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDocument {
    /// Catalog order; labels only found in rules are appended
    #[serde(default)]
    pub catalog: Vec<Label>,
    /// Explicit rule entries
    #[serde(default)]
    pub rules: Vec<RuleRecord>,
    /// Oriented sample entries to rotate
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<RuleRecord>,
    /// Declared symmetry per base name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub symmetries: HashMap<String, Symmetry>,
    /// Collapse weights
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<WeightRecord>,
    /// Label values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ValueRecord>,
    /// Label colours
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<ColorRecord>,
}

fn records_from_table(table: &RuleTable) -> Vec<RuleRecord> {
    table
        .iter()
        .map(|(label, directions)| RuleRecord {
            label: label.clone(),
            directions: directions
                .iter()
                .map(|(&direction, valid)| DirectionRecord {
                    direction,
                    valid: valid.iter().cloned().collect(),
                })
                .collect(),
        })
        .collect()
}

fn table_from_records(records: &[RuleRecord]) -> RuleTable {
    let mut table = RuleTable::new();
    for record in records {
        for entry in &record.directions {
            table.declare(record.label.clone(), entry.direction);
            for neighbor in &entry.valid {
                table.add(record.label.clone(), entry.direction, neighbor.clone());
            }
        }
    }
    table
}

impl RuleDocument {
    /// Capture a rule set
    pub fn from_rule_set(rule_set: &RuleSet) -> Self {
        let mut weights: Vec<WeightRecord> = rule_set
            .weights
            .iter()
            .map(|(label, weight)| WeightRecord {
                label: label.clone(),
                weight,
            })
            .collect();
        weights.sort_by(|a, b| a.label.cmp(&b.label));

        let mut values: Vec<ValueRecord> = rule_set
            .values
            .iter()
            .map(|(label, &value)| ValueRecord {
                label: label.clone(),
                value,
            })
            .collect();
        values.sort_by(|a, b| a.label.cmp(&b.label));

        let mut colors: Vec<ColorRecord> = rule_set
            .colors
            .iter()
            .map(|(label, &color)| ColorRecord {
                label: label.clone(),
                color,
            })
            .collect();
        colors.sort_by(|a, b| a.label.cmp(&b.label));

        Self {
            catalog: rule_set.catalog.labels().to_vec(),
            rules: records_from_table(&rule_set.rules),
            samples: Vec::new(),
            symmetries: HashMap::new(),
            weights,
            values,
            colors,
        }
    }

    /// Resolve into a rule set, expanding oriented samples
    ///
    /// # Errors
    ///
    /// Returns an error if a weight is not positive or the document defines
    /// no labels at all
    pub fn into_rule_set(self) -> Result<RuleSet> {
        let mut catalog = Catalog::new(self.catalog);
        let mut rules = table_from_records(&self.rules);

        if !self.samples.is_empty() {
            let (rotated_catalog, rotated_rules) =
                expand_samples(&table_from_records(&self.samples), &self.symmetries);
            for label in rotated_catalog.labels() {
                catalog.push(label.clone());
            }
            rules.extend(&rotated_rules);
        }

        let rule_labels: Vec<Label> = rules.iter().map(|(label, _)| label.clone()).collect();
        for label in rule_labels {
            catalog.push(label);
        }
        if catalog.is_empty() {
            return Err(invalid_parameter(
                "catalog",
                &0,
                &"rule document defines no labels",
            ));
        }

        let mut weights = WeightTable::new();
        for record in self.weights {
            weights.set(record.label, record.weight)?;
        }

        Ok(RuleSet {
            catalog,
            rules,
            weights,
            values: self
                .values
                .into_iter()
                .map(|record| (record.label, record.value))
                .collect(),
            colors: self
                .colors
                .into_iter()
                .map(|record| (record.label, record.color))
                .collect(),
            art: None,
        })
    }
}

/// Read a rule document from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_rule_document<P: AsRef<Path>>(path: P) -> Result<RuleDocument> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| SolverError::FileSystem {
        path: path.to_path_buf(),
        operation: "read rules",
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| SolverError::RuleLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read and resolve a rule set from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or resolved
pub fn load_rule_set<P: AsRef<Path>>(path: P) -> Result<RuleSet> {
    load_rule_document(path)?.into_rule_set()
}

/// Write any serializable document as pretty JSON
///
/// # Errors
///
/// Returns an error if the parent directory or file cannot be written
pub fn save_json<T: Serialize, P: AsRef<Path>>(document: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }
    let text = serde_json::to_string_pretty(document)?;
    std::fs::write(path, text).map_err(|e| SolverError::FileSystem {
        path: path.to_path_buf(),
        operation: "write document",
        source: e,
    })
}

/// Write a rule document as JSON
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn save_rule_document<P: AsRef<Path>>(document: &RuleDocument, path: P) -> Result<()> {
    save_json(document, path)
}

/// Serialized solve result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDocument {
    /// Extents along `[x, y, z]`
    pub dimensions: [usize; 3],
    /// Label per cell in grid order, `None` when uncollapsed
    pub cells: Vec<Option<Label>>,
}

impl GridDocument {
    /// Capture a grid's chosen labels
    pub fn from_grid(grid: &Grid, catalog: &Catalog) -> Self {
        Self {
            dimensions: grid.dimensions(),
            cells: grid
                .cells()
                .map(|cell| cell.chosen.and_then(|index| catalog.label(index)).cloned())
                .collect(),
        }
    }
}
