//! Tests for entropy and normalization of weight distributions

#[cfg(test)]
mod tests {
    use modulewfc::math::probability::{normalize, weighted_entropy};

    // Tests uniform weights give ln(n) regardless of scale
    // Verified by dividing by total before taking logs
    #[test]
    fn test_uniform_entropy() {
        assert!((weighted_entropy(&[1.0, 1.0, 1.0, 1.0]) - 4f64.ln()).abs() < 1e-12);
        assert!((weighted_entropy(&[7.0, 7.0]) - 2f64.ln()).abs() < 1e-12);
    }

    // Tests skewed weights have lower entropy than uniform ones
    // Verified by ignoring weights in the sum
    #[test]
    fn test_skewed_entropy() {
        let skewed = weighted_entropy(&[9.0, 1.0]);
        assert!(skewed > 0.0);
        assert!(skewed < 2f64.ln());
        let expected = -(0.9f64 * 0.9f64.ln() + 0.1f64 * 0.1f64.ln());
        assert!((skewed - expected).abs() < 1e-12);
    }

    // Tests degenerate distributions have zero entropy
    // Verified by removing the zero total guard
    #[test]
    fn test_degenerate_entropy() {
        assert!(weighted_entropy(&[]).abs() < f64::EPSILON);
        assert!(weighted_entropy(&[0.0, -2.0]).abs() < f64::EPSILON);
        assert!(weighted_entropy(&[5.0]).abs() < 1e-12);
    }

    // Tests normalization skips non-positive weights
    // Verified by including negative weights in the total
    #[test]
    fn test_normalize() {
        let probabilities = normalize(&[1.0, 3.0, -1.0]);
        assert_eq!(probabilities.len(), 3);
        assert!((probabilities[0] - 0.25).abs() < 1e-12);
        assert!((probabilities[1] - 0.75).abs() < 1e-12);
        assert!(probabilities[2].abs() < f64::EPSILON);
        assert!(normalize(&[0.0]).is_empty());
    }
}
