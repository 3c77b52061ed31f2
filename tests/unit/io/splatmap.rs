//! Tests for splatmap value maps and rendering

#[cfg(test)]
mod tests {
    use modulewfc::io::splatmap::{export_splatmap, render_splatmap, splat_color, value_map};
    use modulewfc::spatial::grid::Grid;
    use ndarray::Array2;

    // Tests the four splat channels and out-of-range values
    // Verified by mapping value 4 to white
    #[test]
    fn test_splat_color() {
        assert_eq!(splat_color(1), Some([255, 0, 0, 255]));
        assert_eq!(splat_color(4), Some([0, 0, 0, 255]));
        assert_eq!(splat_color(0), None);
        assert_eq!(splat_color(5), None);
    }

    // Tests planar value maps follow chosen labels
    // Verified by reading the permitted domain instead of the chosen label
    #[test]
    fn test_planar_value_map() {
        let mut grid = Grid::planar(2, 2, 2).unwrap();
        grid.fix([0, 0, 0], 0).unwrap();
        grid.fix([1, 1, 0], 1).unwrap();

        let values = value_map(&grid, &[Some(3), None]);
        assert_eq!(values.dim(), (2, 2));
        assert_eq!(values[[0, 0]], Some(3));
        assert_eq!(values[[1, 1]], None);
        assert_eq!(values[[0, 1]], None);
    }

    // Tests volumetric value maps take the highest valued cell per column
    // Verified by scanning columns bottom-up
    #[test]
    fn test_volumetric_value_map() {
        let mut grid = Grid::volumetric(1, 3, 2, 3).unwrap();
        grid.fix([0, 0, 0], 0).unwrap();
        grid.fix([0, 1, 0], 1).unwrap();
        grid.fix([0, 2, 0], 2).unwrap();
        grid.fix([0, 0, 1], 0).unwrap();

        let values = value_map(&grid, &[Some(1), Some(2), None]);
        assert_eq!(values.dim(), (1, 2));
        assert_eq!(values[[0, 0]], Some(2));
        assert_eq!(values[[0, 1]], Some(1));
    }

    // Tests rendering flips the second axis so it grows upwards
    // Verified by drawing map row 0 at the image top
    #[test]
    fn test_render_splatmap() {
        let values = Array2::from_shape_vec((1, 2), vec![Some(1), Some(3)]).unwrap();
        let img = render_splatmap(&values, 2);

        assert_eq!(img.dimensions(), (2, 4));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(1, 3).0, [255, 0, 0, 255]);
    }

    // Tests export writes a file and rejects zero square sizes
    // Verified by removing the square size check
    #[test]
    fn test_export_splatmap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("splat.png");
        let mut grid = Grid::planar(2, 1, 1).unwrap();
        grid.fix([0, 0, 0], 0).unwrap();

        assert!(export_splatmap(&grid, &[Some(2)], 0, &path).is_err());
        export_splatmap(&grid, &[Some(2)], 4, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (8, 4));
        assert_eq!(loaded.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(loaded.get_pixel(7, 0).0, [0, 0, 0, 0]);
    }
}
