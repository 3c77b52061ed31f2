//! Tests for JSON rule and grid documents

#[cfg(test)]
mod tests {
    use modulewfc::SolverError;
    use modulewfc::io::persistence::{
        DirectionRecord, GridDocument, RuleDocument, RuleRecord, load_rule_document,
        load_rule_set, save_rule_document,
    };
    use modulewfc::rules::catalog::{Catalog, Label, Rotation, WeightTable};
    use modulewfc::rules::rotation::Symmetry;
    use modulewfc::rules::table::{RuleSet, RuleTable};
    use modulewfc::spatial::grid::{Direction, Grid};
    use std::collections::HashMap;

    fn coast_set() -> RuleSet {
        let catalog = Catalog::new([Label::new("sea"), Label::new("land")]);
        let mut rules = RuleTable::new();
        rules.add_symmetric(Label::new("sea"), Direction::Right, Label::new("land"));
        rules.add_symmetric(Label::new("sea"), Direction::Right, Label::new("sea"));
        let mut weights = WeightTable::new();
        weights.set(Label::new("sea"), 3.0).unwrap();
        RuleSet {
            catalog,
            rules,
            weights,
            values: HashMap::from([(Label::new("land"), 2)]),
            colors: HashMap::from([(Label::new("sea"), [0, 0, 255, 255])]),
            art: None,
        }
    }

    // Tests a rule set survives a save and load through a file
    // Verified by dropping weights from the document
    #[test]
    fn test_rule_set_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("coast.json");
        let original = coast_set();

        save_rule_document(&RuleDocument::from_rule_set(&original), &path).unwrap();
        let loaded = load_rule_set(&path).unwrap();

        assert_eq!(loaded.catalog, original.catalog);
        assert_eq!(loaded.rules, original.rules);
        assert!((loaded.weights.get(&Label::new("sea")) - 3.0).abs() < f64::EPSILON);
        assert_eq!(loaded.value_of(&Label::new("land")), Some(2));
        assert_eq!(loaded.color_of(&Label::new("sea")), Some([0, 0, 255, 255]));
    }

    // Tests labels referenced only by rules join the catalog
    // Verified by resolving the catalog from the catalog field alone
    #[test]
    fn test_rule_labels_extend_catalog() {
        let document = RuleDocument {
            catalog: vec![Label::new("a")],
            rules: vec![RuleRecord {
                label: Label::new("b"),
                directions: vec![DirectionRecord {
                    direction: Direction::Up,
                    valid: vec![Label::new("a")],
                }],
            }],
            ..RuleDocument::default()
        };
        let rule_set = document.into_rule_set().unwrap();
        assert_eq!(rule_set.catalog.index_of(&Label::new("a")), Some(0));
        assert_eq!(rule_set.catalog.index_of(&Label::new("b")), Some(1));
    }

    // Tests declared empty directions survive as explicit entries
    // Verified by skipping declare for empty valid lists
    #[test]
    fn test_empty_direction_is_declared() {
        let document = RuleDocument {
            rules: vec![RuleRecord {
                label: Label::new("edge"),
                directions: vec![DirectionRecord {
                    direction: Direction::Left,
                    valid: Vec::new(),
                }],
            }],
            ..RuleDocument::default()
        };
        let rule_set = document.into_rule_set().unwrap();
        assert_eq!(
            rule_set
                .rules
                .allowed(&Label::new("edge"), Direction::Left)
                .map(std::collections::BTreeSet::len),
            Some(0)
        );
    }

    // Tests sample entries are expanded into rotated labels
    // Verified by ignoring samples when resolving
    #[test]
    fn test_samples_expand_rotations() {
        let document = RuleDocument {
            samples: vec![RuleRecord {
                label: Label::new("corner"),
                directions: vec![DirectionRecord {
                    direction: Direction::Right,
                    valid: vec![Label::new("corner")],
                }],
            }],
            symmetries: HashMap::from([("corner".to_string(), Symmetry::None)]),
            ..RuleDocument::default()
        };
        let rule_set = document.into_rule_set().unwrap();
        assert_eq!(rule_set.catalog.len(), 4);
        assert!(
            rule_set
                .catalog
                .index_of(&Label::rotated("corner", Rotation::new(3)))
                .is_some()
        );
    }

    // Tests documents without labels are rejected
    // Verified by removing the empty catalog check
    #[test]
    fn test_empty_document_rejected() {
        assert!(RuleDocument::default().into_rule_set().is_err());
    }

    // Tests malformed JSON reports the rule file path
    // Verified by mapping parse errors to FileSystem
    #[test]
    fn test_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ \"catalog\": [").unwrap();
        let error = load_rule_document(&path).unwrap_err();
        assert!(matches!(error, SolverError::RuleLoad { .. }));
        assert!(error.to_string().contains("broken.json"));
    }

    // Tests missing files surface as file system errors
    // Verified by mapping read errors to RuleLoad
    #[test]
    fn test_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_rule_document(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(error, SolverError::FileSystem { .. }));
    }

    // Tests grid documents record labels in grid order
    // Verified by recording indices instead of labels
    #[test]
    fn test_grid_document() {
        let catalog = Catalog::new([Label::new("sea"), Label::new("land")]);
        let mut grid = Grid::planar(2, 1, 2).unwrap();
        grid.fix([1, 0, 0], 1).unwrap();
        let document = GridDocument::from_grid(&grid, &catalog);

        assert_eq!(document.dimensions, [2, 1, 1]);
        assert_eq!(document.cells, vec![None, Some(Label::new("land"))]);
        let text = serde_json::to_string(&document).unwrap();
        assert!(text.contains("land"));
    }
}
