//! Tests for `Domain` set operations over catalog indices

#[cfg(test)]
mod tests {
    use modulewfc::algorithm::bitset::Domain;

    // Verifies a new domain is empty
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_domain_is_empty() {
        let domain = Domain::new(10);
        assert_eq!(domain.count(), 0);
        assert!(domain.is_empty());
        assert_eq!(domain.capacity(), 10);
    }

    // Tests zero-based insertion, removal and membership
    // Verified by shifting insert to index + 1
    #[test]
    fn test_insert_remove_contains() {
        let mut domain = Domain::new(4);
        domain.insert(0);
        domain.insert(3);
        assert!(domain.contains(0));
        assert!(domain.contains(3));
        assert!(!domain.contains(1));

        domain.remove(0);
        assert!(!domain.contains(0));
        assert_eq!(domain.to_vec(), vec![3]);
    }

    // Tests that out-of-range indices are ignored rather than panicking
    // Verified by removing the bounds check in insert
    #[test]
    fn test_out_of_range_ignored() {
        let mut domain = Domain::new(3);
        domain.insert(7);
        domain.remove(9);
        assert!(domain.is_empty());
        assert!(!domain.contains(7));
    }

    // Tests intersection keeps only shared labels
    // Verified by changing intersection operation to union operation
    #[test]
    fn test_intersection() {
        let mut a = Domain::from_indices(&[0, 2, 4], 6);
        let b = Domain::from_indices(&[2, 4, 5], 6);
        a.intersect_with(&b);
        assert_eq!(a.to_vec(), vec![2, 4]);
        assert_eq!(b.to_vec(), vec![2, 4, 5]);
    }

    // Tests subset relation and clearing
    // Verified by inverting the subset predicate
    #[test]
    fn test_subset_and_clear() {
        let small = Domain::from_indices(&[1], 4);
        let mut large = Domain::all(4);
        assert!(small.is_subset(&large));
        assert!(!large.is_subset(&small));

        large.clear();
        assert!(large.is_empty());
        assert!(large.is_subset(&small));
    }

    // Tests display includes count and members
    // Verified by printing capacity instead of count
    #[test]
    fn test_display() {
        let domain = Domain::from_indices(&[1, 2], 5);
        assert_eq!(domain.to_string(), "Domain(2 labels: [1, 2])");
    }
}
