//! Tests for state signatures, bad-state memoization and history lookups

#[cfg(test)]
mod tests {
    use modulewfc::algorithm::bitset::Domain;
    use modulewfc::algorithm::history::{BadStates, History, HistoryEntry, StateSignature};
    use modulewfc::spatial::grid::Grid;

    fn entry(signature: &str, position: [usize; 3], label: usize) -> HistoryEntry {
        HistoryEntry {
            signature: StateSignature::from_encoded(signature.to_string()),
            position,
            label,
        }
    }

    // Tests signatures list cells in x-major order with x for open cells
    // Verified by iterating y before x when capturing
    #[test]
    fn test_capture_format() {
        let mut grid = Grid::planar(2, 2, 3).unwrap();
        grid.cell_mut([0, 1, 0]).unwrap().chosen = Some(2);
        grid.cell_mut([1, 0, 0]).unwrap().chosen = Some(0);
        assert_eq!(StateSignature::capture(&grid).as_str(), "x-2-0-x");
    }

    // Tests restoring a signature brings back chosen labels and open domains
    // Verified by skipping the domain reset for uncollapsed entries
    #[test]
    fn test_restore_round_trip() {
        let mut grid = Grid::planar(3, 1, 2).unwrap();
        grid.cell_mut([0, 0, 0]).unwrap().chosen = Some(1);
        let saved = StateSignature::capture(&grid);

        grid.cell_mut([1, 0, 0]).unwrap().chosen = Some(0);
        grid.cell_mut([2, 0, 0]).unwrap().domain = Domain::new(2);
        saved.restore(&mut grid).unwrap();

        assert_eq!(StateSignature::capture(&grid), saved);
        assert_eq!(grid.cell([2, 0, 0]).unwrap().domain.count(), 2);
    }

    // Tests fixed cells keep their label on restore
    // Verified by removing the fixed check in restore
    #[test]
    fn test_restore_keeps_fixed() {
        let mut grid = Grid::planar(2, 1, 2).unwrap();
        grid.fix([0, 0, 0], 1).unwrap();
        StateSignature::from_encoded("x-x".to_string())
            .restore(&mut grid)
            .unwrap();
        assert_eq!(grid.cell([0, 0, 0]).unwrap().chosen, Some(1));
    }

    // Tests malformed signatures are rejected
    // Verified by skipping the length comparison
    #[test]
    fn test_restore_rejects_malformed() {
        let mut grid = Grid::planar(2, 1, 2).unwrap();
        for bad in ["x", "x-x-x", "x-q", "x-7"] {
            let result = StateSignature::from_encoded(bad.to_string()).restore(&mut grid);
            assert!(result.is_err(), "{bad} should be rejected");
        }
    }

    // Tests bad states are remembered once
    // Verified by always returning true from insert
    #[test]
    fn test_bad_states() {
        let mut bad = BadStates::new();
        let signature = StateSignature::from_encoded("0-x".to_string());
        assert!(bad.insert(signature.clone()));
        assert!(!bad.insert(signature.clone()));
        assert!(bad.contains(&signature));
        assert_eq!(bad.len(), 1);
    }

    // Tests adjacent lookup finds the newest neighbouring collapse still in place
    // Verified by searching from the oldest entry
    #[test]
    fn test_last_adjacent() {
        let mut grid = Grid::planar(4, 1, 2).unwrap();
        grid.cell_mut([0, 0, 0]).unwrap().chosen = Some(0);
        grid.cell_mut([2, 0, 0]).unwrap().chosen = Some(1);
        grid.cell_mut([3, 0, 0]).unwrap().chosen = Some(1);

        let mut history = History::new();
        history.push(entry("x-x-x-x", [0, 0, 0], 0));
        history.push(entry("0-x-x-x", [2, 0, 0], 1));
        history.push(entry("0-x-1-x", [3, 0, 0], 1));

        assert_eq!(history.last_adjacent([1, 0, 0], &grid), Some(1));
        assert_eq!(history.last_collapsed(&grid), Some(2));

        grid.cell_mut([2, 0, 0]).unwrap().chosen = None;
        assert_eq!(history.last_adjacent([1, 0, 0], &grid), Some(0));

        history.truncate(1);
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
    }
}
