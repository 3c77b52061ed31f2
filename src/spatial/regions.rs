//! Connected groups of open cells on a planar occupancy map

use ndarray::Array2;

/// One 4-connected group of open cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGroup {
    /// Member cells as `[x, y]`, in discovery order
    pub cells: Vec<[usize; 2]>,
    /// Whether any member lies on the outer edge of the map
    pub touches_boundary: bool,
}

impl CellGroup {
    /// Number of member cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Test if the group has no members
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Test whether the group is fully surrounded by blocked cells
    pub const fn is_enclosed(&self) -> bool {
        !self.touches_boundary
    }
}

/// Partition every open cell into 4-connected groups
///
/// `blocked` is indexed `[x, y]`; `true` marks a wall. Every open cell lands
/// in exactly one group. Scanning runs x outermost, and each group is
/// explored depth-first with an explicit stack.
pub fn find_groups(blocked: &Array2<bool>) -> Vec<CellGroup> {
    let (width, height) = blocked.dim();
    let mut visited = Array2::from_elem((width, height), false);
    let mut groups = Vec::new();

    for x in 0..width {
        for y in 0..height {
            let open = blocked.get([x, y]).is_some_and(|&wall| !wall);
            let seen = visited.get([x, y]).copied().unwrap_or(true);
            if open && !seen {
                groups.push(explore(blocked, &mut visited, [x, y]));
            }
        }
    }

    groups
}

/// Groups that do not reach the edge of the map
pub fn enclosed_groups(blocked: &Array2<bool>) -> Vec<CellGroup> {
    find_groups(blocked)
        .into_iter()
        .filter(CellGroup::is_enclosed)
        .collect()
}

fn explore(blocked: &Array2<bool>, visited: &mut Array2<bool>, start: [usize; 2]) -> CellGroup {
    let (width, height) = blocked.dim();
    let mut group = CellGroup {
        cells: Vec::new(),
        touches_boundary: false,
    };
    let mut stack = vec![start];
    if let Some(flag) = visited.get_mut(start) {
        *flag = true;
    }

    while let Some([x, y]) = stack.pop() {
        group.cells.push([x, y]);
        if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
            group.touches_boundary = true;
        }

        let neighbors = [
            x.checked_add(1).map(|nx| [nx, y]),
            x.checked_sub(1).map(|nx| [nx, y]),
            y.checked_add(1).map(|ny| [x, ny]),
            y.checked_sub(1).map(|ny| [x, ny]),
        ];
        for next in neighbors.into_iter().flatten() {
            let open = blocked.get(next).is_some_and(|&wall| !wall);
            if !open {
                continue;
            }
            if let Some(flag) = visited.get_mut(next) {
                if !*flag {
                    *flag = true;
                    stack.push(next);
                }
            }
        }
    }

    group
}
