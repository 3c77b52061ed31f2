//! Solver constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default tick budget for a single solver pass
pub const DEFAULT_MAX_TICKS: usize = 100_000;

// Restarts after every backtrack target is spent; beyond this the pass aborts
/// Default number of full restarts before a pass is aborted
pub const DEFAULT_MAX_RESTARTS: usize = 2;

/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 16;

/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 16;

/// Default edge length of sample tiles in pixels
pub const DEFAULT_TILE_SIZE: usize = 3;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension along any axis
pub const MAX_GRID_DIMENSION: usize = 4096;

// Two-pass footprint generation
/// Number of fine cells per coarse cell along each horizontal axis
pub const SUBDIVISION_FACTOR: usize = 4;
/// Default number of fine layers stacked on the footprint
pub const DEFAULT_FINE_HEIGHT: usize = 3;
/// Default fine label fixed outside the footprint
pub const DEFAULT_VOID_LABEL: &str = "void";

// State signature encoding
/// Separator between cell entries in a state signature
pub const SIGNATURE_SEPARATOR: char = '-';
/// Marker for an uncollapsed cell in a state signature
pub const UNCOLLAPSED_MARK: &str = "x";

// Tie tolerance when comparing weighted entropies
/// Entropies closer than this are treated as equal
pub const ENTROPY_TOLERANCE: f64 = 1e-12;

// Biased collapse
/// Weight multiplier for labels matching the cell's value
pub const DEFAULT_BIAS_STRENGTH: f64 = 4.0;
/// Number of distinct values produced by value fields
pub const DEFAULT_VALUE_RANGE: u32 = 4;

// Splatmap export
/// Edge length in pixels of one splatmap square
pub const SPLATMAP_SQUARE_SIZE: u32 = 40;

// Output settings
/// Default pixel size of a cell when rendering label colours
pub const DEFAULT_CELL_SIZE: usize = 8;
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to splatmap filenames
pub const SPLATMAP_SUFFIX: &str = "_splatmap";
/// Suffix added to fine footprint grid filenames
pub const FOOTPRINT_SUFFIX: &str = "_footprint";
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;

// Progress bar display settings
/// Number of ticks between progress bar refreshes
pub const PROGRESS_REFRESH_TICKS: usize = 16;
