//! Tests for value fields used by biased collapse

#[cfg(test)]
mod tests {
    use modulewfc::math::fields::{ValueField, band, lerp};

    // Tests interpolation endpoints and midpoint
    // Verified by swapping a and b
    #[test]
    fn test_lerp() {
        assert!((lerp(2.0_f64, 6.0, 0.0) - 2.0).abs() < f64::EPSILON);
        assert!((lerp(2.0_f64, 6.0, 0.5) - 4.0).abs() < f64::EPSILON);
        assert!((lerp(2.0_f32, 6.0, 1.0) - 6.0).abs() < f32::EPSILON);
    }

    // Tests fractions map onto bands numbered from 1 and clamp
    // Verified by dropping the upper clamp
    #[test]
    fn test_band() {
        assert_eq!(band(0.0_f64, 4), 1);
        assert_eq!(band(0.3_f64, 4), 2);
        assert_eq!(band(1.0_f64, 4), 4);
        assert_eq!(band(1.7_f64, 4), 4);
        assert_eq!(band(-0.5_f64, 4), 1);
        assert_eq!(band(0.9_f64, 1), 1);
    }

    // Tests horizontal fields increase from left to right
    // Verified by indexing the band on y
    #[test]
    fn test_horizontal_field() {
        let field = ValueField::Horizontal.generate(4, 3, 4);
        assert_eq!(field.dim(), (4, 3));
        assert_eq!(field[[0, 2]], 1);
        assert_eq!(field[[3, 0]], 4);
        for y in 0..3 {
            for x in 1..4 {
                assert!(field[[x, y]] >= field[[x - 1, y]]);
            }
        }
    }

    // Tests radial fields are lowest at the centre and highest at corners
    // Verified by measuring distance from the origin
    #[test]
    fn test_radial_field() {
        let field = ValueField::Radial.generate(5, 5, 3);
        assert_eq!(field[[2, 2]], 1);
        assert_eq!(field[[0, 0]], 3);
        assert_eq!(field[[4, 4]], 3);
    }

    // Tests grown regions fill the grid within range and repeat per seed
    // Verified by leaving unreached cells at zero
    #[test]
    fn test_growing_regions() {
        let field = ValueField::GrowingRegions { seed: 9 }.generate(8, 6, 3);
        assert!(field.iter().all(|&value| (1..=3).contains(&value)));
        assert_eq!(field, ValueField::GrowingRegions { seed: 9 }.generate(8, 6, 3));
    }

    // Tests a zero range is treated as one band
    // Verified by removing the range floor
    #[test]
    fn test_zero_range() {
        let field = ValueField::Horizontal.generate(3, 1, 0);
        assert!(field.iter().all(|&value| value == 1));
    }
}
