/// Bitset domains over catalog indices
pub mod bitset;
/// Weighted label choice and the seeded random source
pub mod collapse;
/// Solver pass orchestration and backtracking
pub mod executor;
/// State signatures, bad states and the collapse log
pub mod history;
/// Coarse-to-fine footprint pipeline
pub mod pipeline;
/// Full-grid domain refresh
pub mod propagation;
/// Lowest-entropy cell selection
pub mod selection;
