use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over catalog indices
///
/// Each bit stands for one label of the catalog, so a cell's remaining
/// candidates are a `Domain` of catalog length. Membership tests and set
/// operations work on whole words.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Domain {
    bits: BitVec,
}

impl Domain {
    /// Create a domain with no labels present
    pub fn new(catalog_size: usize) -> Self {
        Self {
            bits: bitvec![0; catalog_size],
        }
    }

    /// Create a domain containing every label of the catalog
    pub fn all(catalog_size: usize) -> Self {
        Self {
            bits: bitvec![1; catalog_size],
        }
    }

    /// Create a domain from a list of catalog indices
    ///
    /// Indices beyond the catalog size are ignored
    pub fn from_indices(indices: &[usize], catalog_size: usize) -> Self {
        let mut domain = Self::new(catalog_size);
        for &index in indices {
            domain.insert(index);
        }
        domain
    }

    /// Number of labels the domain ranges over
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a catalog index
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Remove a catalog index
    pub fn remove(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, false);
        }
    }

    /// Test label membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Intersect this domain with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Test whether every label of this domain is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.bits.iter_ones().all(|index| other.contains(index))
    }

    /// Remove every label
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Test if no labels are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count labels in the domain
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate present catalog indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all catalog indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Domain({} labels: {:?})", self.count(), self.to_vec())
    }
}
