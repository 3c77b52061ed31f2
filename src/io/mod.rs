/// Command-line parsing and the file runner
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG export of planar results
pub mod image;
/// JSON rule documents
pub mod persistence;
/// Terminal progress display
pub mod progress;
/// Splatmap export
pub mod splatmap;
/// GIF capture of the solve
pub mod visualization;
