//! Wave function collapse solver for modular tile and block layouts
//!
//! Cells of a planar or volumetric grid start with every label of a catalog
//! and are collapsed one at a time, lowest entropy first, while an adjacency
//! rule table keeps neighbours compatible. Dead ends roll back through a
//! history of state signatures, and a coarse layout can be carved into a
//! footprint for a second, finer pass.

#![forbid(unsafe_code)]

/// Solver core: domains, propagation, selection, collapse and backtracking
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Entropy and value field utilities
pub mod math;
/// Label catalogs, rule tables, rotation derivation and sample ingestion
pub mod rules;
/// Grids, neighbour directions and region analysis
pub mod spatial;

pub use io::error::{Result, SolverError};
