//! Tests for rule tables, compilation and rule sets

#[cfg(test)]
mod tests {
    use modulewfc::rules::catalog::{Catalog, Label};
    use modulewfc::rules::table::{RuleSet, RuleTable};
    use modulewfc::spatial::grid::Direction;
    use std::collections::HashMap;

    fn label(name: &str) -> Label {
        Label::new(name)
    }

    // Tests symmetric adds write both directions
    // Verified by dropping the reverse add
    #[test]
    fn test_add_symmetric() {
        let mut rules = RuleTable::new();
        rules.add_symmetric(label("sea"), Direction::Right, label("coast"));

        assert!(rules.allowed(&label("sea"), Direction::Right).unwrap().contains(&label("coast")));
        assert!(rules.allowed(&label("coast"), Direction::Left).unwrap().contains(&label("sea")));
        assert!(rules.asymmetric_entries().is_empty());
        assert_eq!(rules.len(), 2);
    }

    // Tests one-sided entries are reported, not repaired
    // Verified by adding the reverse entry during add
    #[test]
    fn test_asymmetric_entries() {
        let mut rules = RuleTable::new();
        rules.add(label("a"), Direction::Up, label("b"));

        assert_eq!(
            rules.asymmetric_entries(),
            vec![(label("a"), Direction::Up, label("b"))]
        );
        assert!(rules.allowed(&label("b"), Direction::Down).is_none());
    }

    // Tests declared directions exist with no neighbours
    // Verified by skipping the inner entry in declare
    #[test]
    fn test_declare() {
        let mut rules = RuleTable::new();
        rules.declare(label("a"), Direction::Forward);
        assert_eq!(rules.allowed(&label("a"), Direction::Forward).map(|set| set.len()), Some(0));
        assert!(rules.entry(&label("a")).is_some());
    }

    // Tests extend merges neighbour sets
    // Verified by replacing sets instead of merging
    #[test]
    fn test_extend() {
        let mut first = RuleTable::new();
        first.add(label("a"), Direction::Right, label("a"));
        let mut second = RuleTable::new();
        second.add(label("a"), Direction::Right, label("b"));
        first.extend(&second);

        assert_eq!(first.allowed(&label("a"), Direction::Right).unwrap().len(), 2);
    }

    // Tests compilation resolves labels to indices and ignores unknown ones
    // Verified by inserting unknown labels at index 0
    #[test]
    fn test_compile() {
        let catalog = Catalog::new([label("a"), label("b")]);
        let mut rules = RuleTable::new();
        rules.add(label("a"), Direction::Up, label("b"));
        rules.add(label("a"), Direction::Up, label("ghost"));
        rules.add(label("ghost"), Direction::Up, label("a"));

        let compiled = rules.compile(&catalog);
        assert_eq!(compiled.catalog_size(), 2);
        assert_eq!(compiled.allowed(0, Direction::Up).unwrap().to_vec(), vec![1]);
        assert!(compiled.allowed(0, Direction::Down).unwrap().is_empty());
        assert!(compiled.allowed(1, Direction::Up).unwrap().is_empty());
        assert!(compiled.allowed(2, Direction::Up).is_none());
    }

    // Tests rotated labels inherit values and colours from their base
    // Verified by looking up only the exact label
    #[test]
    fn test_rule_set_base_fallback() {
        let rule_set = RuleSet {
            catalog: Catalog::new([label("ramp").turned(1), label("flat")]),
            values: HashMap::from([(label("ramp"), 3)]),
            colors: HashMap::from([(label("flat"), [1, 2, 3, 255])]),
            ..RuleSet::default()
        };

        assert_eq!(rule_set.value_of(&label("ramp").turned(1)), Some(3));
        assert_eq!(rule_set.values_for_catalog(), vec![Some(3), None]);
        assert_eq!(rule_set.color_of(&label("flat")), Some([1, 2, 3, 255]));
        assert_eq!(rule_set.color_of(&label("ramp")), None);
    }
}
