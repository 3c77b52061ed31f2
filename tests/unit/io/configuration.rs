//! Tests for solver configuration constants

#[cfg(test)]
mod tests {
    use modulewfc::io::configuration::{
        DEFAULT_CELL_SIZE, DEFAULT_FINE_HEIGHT, DEFAULT_MAX_RESTARTS, DEFAULT_SEED,
        DEFAULT_VOID_LABEL, ENTROPY_TOLERANCE, FOOTPRINT_SUFFIX, GIF_FRAME_DELAY_MS,
        MAX_GRID_DIMENSION, OUTPUT_SUFFIX, SIGNATURE_SEPARATOR, SPLATMAP_SQUARE_SIZE,
        SUBDIVISION_FACTOR, UNCOLLAPSED_MARK, VIEWER_MIN_FRAME_DELAY_MS,
    };

    // Tests restart budget default
    // Verified by changing constant value
    #[test]
    fn test_restart_budget() {
        assert_eq!(DEFAULT_MAX_RESTARTS, 2);
    }

    // Tests signature encoding markers cannot collide with indices
    // Verified by using a digit as the uncollapsed mark
    #[test]
    fn test_signature_markers() {
        assert_eq!(SIGNATURE_SEPARATOR, '-');
        assert_eq!(UNCOLLAPSED_MARK, "x");
        assert!(UNCOLLAPSED_MARK.parse::<usize>().is_err());
    }

    // Tests subdivision and splatmap sizes
    // Verified by changing constant values
    #[test]
    fn test_sizes() {
        assert_eq!(SUBDIVISION_FACTOR, 4);
        assert_eq!(DEFAULT_FINE_HEIGHT, 3);
        assert_eq!(DEFAULT_CELL_SIZE, 8);
        assert_eq!(SPLATMAP_SQUARE_SIZE, 40);
        assert!(MAX_GRID_DIMENSION >= 256);
    }

    // Tests default seed value
    // Verified by changing seed constant
    #[test]
    fn test_default_seed() {
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests entropy tolerance is small but positive
    // Verified by setting tolerance to zero
    #[test]
    fn test_entropy_tolerance() {
        assert!(ENTROPY_TOLERANCE > 0.0 && ENTROPY_TOLERANCE < 1e-6);
    }

    // Tests output naming and GIF timing
    // Verified by changing constant values
    #[test]
    fn test_output_settings() {
        assert_eq!(OUTPUT_SUFFIX, "_result");
        assert_eq!(FOOTPRINT_SUFFIX, "_footprint");
        assert_eq!(DEFAULT_VOID_LABEL, "void");
        assert!(GIF_FRAME_DELAY_MS < VIEWER_MIN_FRAME_DELAY_MS);
    }
}
