//! Tests for PNG export of planar grids

#[cfg(test)]
mod tests {
    use modulewfc::io::image::{export_grid_as_png, label_color, palette_color, render_grid};
    use modulewfc::rules::catalog::{Catalog, Label};
    use modulewfc::rules::sample::TileArt;
    use modulewfc::rules::table::RuleSet;
    use modulewfc::spatial::grid::Grid;
    use std::collections::HashMap;

    fn two_label_set() -> RuleSet {
        RuleSet {
            catalog: Catalog::new([Label::new("red"), Label::new("blue")]),
            colors: HashMap::from([
                (Label::new("red"), [255, 0, 0, 255]),
                (Label::new("blue"), [0, 0, 255, 255]),
            ]),
            ..RuleSet::default()
        }
    }

    // Tests palette colours are opaque and differ between neighbours
    // Verified by returning a constant colour
    #[test]
    fn test_palette_color() {
        assert_eq!(palette_color(0)[3], 255);
        assert_ne!(palette_color(0), palette_color(1));
        assert_ne!(palette_color(1), palette_color(2));
    }

    // Tests rule set colours win over the palette
    // Verified by always using the palette
    #[test]
    fn test_label_color_prefers_rule_set() {
        let rule_set = two_label_set();
        assert_eq!(label_color(&rule_set, &rule_set.catalog, 1), [0, 0, 255, 255]);
        assert_eq!(label_color(&rule_set, &rule_set.catalog, 5), palette_color(5));
    }

    // Tests cells are drawn with y growing upwards and gaps left transparent
    // Verified by drawing row y at image row y
    #[test]
    fn test_render_grid_orientation() {
        let rule_set = two_label_set();
        let mut grid = Grid::planar(1, 2, 2).unwrap();
        grid.fix([0, 1, 0], 0).unwrap();

        let img = render_grid(&grid, &rule_set.catalog, &rule_set, 2).unwrap();
        assert_eq!(img.dimensions(), (2, 4));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 3).0, [0, 0, 0, 0]);
    }

    // Tests tile art replaces colour squares
    // Verified by ignoring art pixels
    #[test]
    fn test_render_grid_with_art() {
        let mut rule_set = two_label_set();
        rule_set.art = Some(TileArt {
            tile_size: 1,
            pixels: HashMap::from([(Label::new("blue"), vec![[9, 9, 9, 255]])]),
        });
        let mut grid = Grid::planar(1, 1, 2).unwrap();
        grid.fix([0, 0, 0], 1).unwrap();

        let img = render_grid(&grid, &rule_set.catalog, &rule_set, 8).unwrap();
        assert_eq!(img.dimensions(), (1, 1));
        assert_eq!(img.get_pixel(0, 0).0, [9, 9, 9, 255]);
    }

    // Tests volumetric grids and zero cell sizes are rejected
    // Verified by removing the topology check
    #[test]
    fn test_render_grid_rejects() {
        let rule_set = two_label_set();
        let volume = Grid::volumetric(2, 2, 2, 2).unwrap();
        assert!(render_grid(&volume, &rule_set.catalog, &rule_set, 2).is_err());

        let plane = Grid::planar(2, 2, 2).unwrap();
        assert!(render_grid(&plane, &rule_set.catalog, &rule_set, 0).is_err());
    }

    // Tests PNG export creates missing directories
    // Verified by removing create_dir_all
    #[test]
    fn test_export_grid_as_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("grid.png");
        let rule_set = two_label_set();
        let mut grid = Grid::planar(2, 2, 2).unwrap();
        grid.fix([0, 0, 0], 1).unwrap();

        export_grid_as_png(&grid, &rule_set.catalog, &rule_set, 3, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (6, 6));
        assert_eq!(loaded.get_pixel(0, 5).0, [0, 0, 255, 255]);
    }
}
