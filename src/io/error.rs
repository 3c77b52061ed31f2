//! Error types for rule loading, grid setup and solver passes

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolverError {
    /// Failed to read or parse a rule document
    RuleLoad {
        /// Path to the rule document
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Failed to load a sample image from filesystem
    SampleLoad {
        /// Path to the sample image
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data doesn't meet solver requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Label is not part of the catalog
    UnknownLabel {
        /// Display form of the label
        label: String,
    },

    /// Label exists but lies outside the cell's own catalog
    LabelNotPermitted {
        /// Display form of the label
        label: String,
        /// Cell position as `[x, y, z]`
        position: [usize; 3],
    },

    /// Position lies outside the grid dimensions
    PositionOutOfBounds {
        /// Requested position as `[x, y, z]`
        position: [usize; 3],
        /// Grid dimensions as `[x, y, z]`
        dimensions: [usize; 3],
    },

    /// State signature cannot be applied to the grid
    MalformedSignature {
        /// Description of the mismatch
        reason: String,
    },

    /// Solver pass ran out of restarts
    ///
    /// Occurs when every backtrack target has been exhausted more times
    /// than the configured restart budget allows
    PassAborted {
        /// Restarts performed before giving up
        restarts: usize,
        /// Ticks executed before giving up
        ticks: usize,
    },

    /// Failed to save an image or animation to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuleLoad { path, source } => {
                write!(f, "Failed to load rules '{}': {source}", path.display())
            }
            Self::SampleLoad { path, source } => {
                write!(f, "Failed to load sample '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::UnknownLabel { label } => {
                write!(f, "Label '{label}' is not in the catalog")
            }
            Self::LabelNotPermitted { label, position } => {
                write!(
                    f,
                    "Label '{label}' is not permitted at {}x{}x{}",
                    position[0], position[1], position[2]
                )
            }
            Self::PositionOutOfBounds {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Position {}x{}x{} is outside grid {}x{}x{}",
                    position[0],
                    position[1],
                    position[2],
                    dimensions[0],
                    dimensions[1],
                    dimensions[2]
                )
            }
            Self::MalformedSignature { reason } => {
                write!(f, "Malformed state signature: {reason}")
            }
            Self::PassAborted { restarts, ticks } => {
                write!(
                    f,
                    "Solver pass aborted after {restarts} restarts and {ticks} ticks"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SampleLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::RuleLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

impl From<image::ImageError> for SolverError {
    fn from(err: image::ImageError) -> Self {
        Self::SampleLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for SolverError {
    fn from(err: serde_json::Error) -> Self {
        Self::RuleLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an unknown label error
pub fn unknown_label(label: &impl ToString) -> SolverError {
    SolverError::UnknownLabel {
        label: label.to_string(),
    }
}

/// Create a malformed signature error
pub fn malformed_signature(reason: &impl ToString) -> SolverError {
    SolverError::MalformedSignature {
        reason: reason.to_string(),
    }
}
