//! Derivation of rotated rule entries from oriented samples
//!
//! A module authored in one orientation yields its other three orientations
//! by turning every direction of its rule entry and every neighbour label by
//! the same number of quarter turns around the vertical axis.

use crate::rules::catalog::{Catalog, Label, Rotation};
use crate::rules::table::RuleTable;
use crate::spatial::grid::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Rotational symmetry of a module base
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symmetry {
    /// Every quarter turn is a distinct variant
    #[default]
    None,
    /// Half turns look identical, so two variants exist
    Half,
    /// Every turn looks identical, so one variant exists
    Full,
}

impl Symmetry {
    /// Quarter turns after which the module looks the same again
    pub const fn period(self) -> u8 {
        match self {
            Self::None => 4,
            Self::Half => 2,
            Self::Full => 1,
        }
    }

    /// Representative orientation of a rotation's equivalence class
    pub const fn canonical(self, rotation: Rotation) -> Rotation {
        Rotation::new(rotation.quarter_turns() % self.period())
    }

    /// Every orientation that looks identical to `rotation`
    pub fn equivalents(self, rotation: Rotation) -> Vec<Rotation> {
        let period = self.period();
        let base = rotation.quarter_turns() % period;
        (0..4 / period)
            .map(|k| Rotation::new(base + k * period))
            .collect()
    }
}

/// Declared symmetry per module base; bases without an entry have none
pub type Symmetries = HashMap<String, Symmetry>;

/// Directional entry of one label
pub type RuleEntry = BTreeMap<Direction, BTreeSet<Label>>;

fn symmetry_of(symmetries: &Symmetries, base: &str) -> Symmetry {
    symmetries.get(base).copied().unwrap_or_default()
}

/// Turn a direction by quarter turns around the vertical axis
///
/// Horizontal directions advance along Right, Back, Left, Forward. Up and
/// Down are unchanged.
pub fn rotate_direction(direction: Direction, quarter_turns: u8) -> Direction {
    let cycle = Direction::HORIZONTAL_CYCLE;
    match cycle.iter().position(|&d| d == direction) {
        Some(slot) => {
            let turned = (slot + quarter_turns as usize) % cycle.len();
            cycle.get(turned).copied().unwrap_or(direction)
        }
        None => direction,
    }
}

/// Derive the entry for `target` from an entry authored at `source`
///
/// Neighbour labels whose base is symmetric expand to every orientation that
/// looks the same, so the derived entry stays valid whichever variant the
/// catalog keeps.
pub fn derive_rotation(
    entry: &RuleEntry,
    source: Rotation,
    target: Rotation,
    symmetries: &Symmetries,
) -> RuleEntry {
    let delta = source.steps_to(target);
    let mut derived = RuleEntry::new();

    for (&direction, neighbors) in entry {
        let slot = derived.entry(rotate_direction(direction, delta)).or_default();
        for neighbor in neighbors {
            let turned = neighbor.turned(delta);
            let symmetry = symmetry_of(symmetries, &turned.base);
            for rotation in symmetry.equivalents(turned.rotation) {
                slot.insert(Label::rotated(turned.base.clone(), rotation));
            }
        }
    }

    derived
}

/// Build the rotated catalog and full rule table from oriented samples
///
/// Every sample label is derived into all four orientations. Orientations
/// that a base's symmetry makes identical collapse onto one catalog label,
/// and their derived entries are merged.
pub fn expand_samples(samples: &RuleTable, symmetries: &Symmetries) -> (Catalog, RuleTable) {
    let mut catalog = Catalog::default();
    let mut rules = RuleTable::new();

    for (label, entry) in samples.iter() {
        let symmetry = symmetry_of(symmetries, &label.base);
        for quarter_turns in 0..4 {
            let target = label.rotation.add(quarter_turns);
            let variant = Label::rotated(label.base.clone(), symmetry.canonical(target));
            catalog.push(variant.clone());

            for (direction, neighbors) in derive_rotation(entry, label.rotation, target, symmetries)
            {
                rules.declare(variant.clone(), direction);
                for neighbor in neighbors {
                    rules.add(variant.clone(), direction, neighbor);
                }
            }
        }
    }

    (catalog, rules)
}
