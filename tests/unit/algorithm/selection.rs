//! Tests for entropy scoring and lowest-entropy candidate selection

#[cfg(test)]
mod tests {
    use modulewfc::algorithm::bitset::Domain;
    use modulewfc::algorithm::selection::{EntropyMode, cell_entropy, lowest_entropy_cells};
    use modulewfc::spatial::grid::{Cell, Grid};

    // Tests count mode scores by remaining candidates
    // Verified by scoring with the permitted set instead of the domain
    #[test]
    fn test_count_entropy() {
        let mut cell = Cell::new([0, 0, 0], Domain::all(4));
        cell.domain = Domain::from_indices(&[0, 2], 4);
        assert!((cell_entropy(&cell, EntropyMode::Count, &[]) - 2.0).abs() < f64::EPSILON);
    }

    // Tests weighted mode treats skewed weights as less uncertain
    // Verified by ignoring the weights in weighted mode
    #[test]
    fn test_weighted_entropy_prefers_skew() {
        let cell = Cell::new([0, 0, 0], Domain::all(2));
        let even = cell_entropy(&cell, EntropyMode::Weighted, &[1.0, 1.0]);
        let skewed = cell_entropy(&cell, EntropyMode::Weighted, &[1.0, 99.0]);
        assert!((even - 2.0_f64.ln()).abs() < 1e-9);
        assert!(skewed < even);
    }

    // Tests every tied minimum is returned in grid order
    // Verified by keeping only the first minimum found
    #[test]
    fn test_ties_returned_in_order() {
        let mut grid = Grid::planar(3, 1, 3).unwrap();
        grid.cell_mut([0, 0, 0]).unwrap().domain = Domain::from_indices(&[0, 1], 3);
        grid.cell_mut([2, 0, 0]).unwrap().domain = Domain::from_indices(&[1, 2], 3);
        let candidates = lowest_entropy_cells(&grid, EntropyMode::Count, &[]);
        assert_eq!(candidates, vec![[0, 0, 0], [2, 0, 0]]);
    }

    // Tests collapsed cells are never candidates
    // Verified by dropping the collapsed filter
    #[test]
    fn test_collapsed_cells_skipped() {
        let mut grid = Grid::planar(2, 1, 2).unwrap();
        grid.fix([0, 0, 0], 0).unwrap();
        let candidates = lowest_entropy_cells(&grid, EntropyMode::Count, &[]);
        assert_eq!(candidates, vec![[1, 0, 0]]);

        grid.fix([1, 0, 0], 0).unwrap();
        assert!(lowest_entropy_cells(&grid, EntropyMode::Count, &[]).is_empty());
    }

    // Tests dead-end cells are surfaced before any other candidate
    // Verified by skipping the dead-end early return
    #[test]
    fn test_dead_ends_first() {
        let mut grid = Grid::planar(3, 1, 2).unwrap();
        grid.cell_mut([1, 0, 0]).unwrap().domain = Domain::new(2);
        grid.cell_mut([2, 0, 0]).unwrap().domain = Domain::from_indices(&[0], 2);
        let candidates = lowest_entropy_cells(&grid, EntropyMode::Weighted, &[1.0, 1.0]);
        assert_eq!(candidates, vec![[1, 0, 0]]);
    }
}
