//! Mathematical utilities for the solver

/// Value fields that steer biased collapse
pub mod fields;
/// Entropy of weighted label distributions
pub mod probability;
