//! Solver grid with per-cell candidate domains
//!
//! Cells live in a dense `[x, y, z]` array whose dimensions are fixed at
//! construction. Planar grids use a depth of one and 4-connectivity,
//! volumetric grids add the `Forward`/`Back` axis for 6-connectivity.

use crate::algorithm::bitset::Domain;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, SolverError, invalid_parameter};
use ndarray::Array3;
use serde::{Deserialize, Serialize};

/// Cell coordinates as `[x, y, z]`
pub type Position = [usize; 3];

/// Neighbour direction along one grid axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards +x
    Right,
    /// Towards -x
    Left,
    /// Towards +y
    Up,
    /// Towards -y
    Down,
    /// Towards +z
    Forward,
    /// Towards -z
    Back,
}

impl Direction {
    /// All six directions
    pub const ALL: [Self; 6] = [
        Self::Right,
        Self::Left,
        Self::Up,
        Self::Down,
        Self::Forward,
        Self::Back,
    ];

    /// Directions used by planar grids
    pub const PLANAR: [Self; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];

    /// Horizontal directions in the order a quarter turn advances them
    pub const HORIZONTAL_CYCLE: [Self; 4] = [Self::Right, Self::Back, Self::Left, Self::Forward];

    /// Direction pointing the other way along the same axis
    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Forward => Self::Back,
            Self::Back => Self::Forward,
        }
    }

    /// Unit step along `[x, y, z]`
    pub const fn offset(self) -> [isize; 3] {
        match self {
            Self::Right => [1, 0, 0],
            Self::Left => [-1, 0, 0],
            Self::Up => [0, 1, 0],
            Self::Down => [0, -1, 0],
            Self::Forward => [0, 0, 1],
            Self::Back => [0, 0, -1],
        }
    }

    /// Stable index in `0..6` for table lookups
    pub const fn index(self) -> usize {
        match self {
            Self::Right => 0,
            Self::Left => 1,
            Self::Up => 2,
            Self::Down => 3,
            Self::Forward => 4,
            Self::Back => 5,
        }
    }

    /// Test whether the direction runs along the y axis
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Connectivity of a grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// 4-connected `[x, y]` grid with a depth of one
    Planar,
    /// 6-connected `[x, y, z]` grid
    Volumetric,
}

impl Topology {
    /// Directions that connect neighbouring cells
    pub const fn directions(self) -> &'static [Direction] {
        match self {
            Self::Planar => &Direction::PLANAR,
            Self::Volumetric => &Direction::ALL,
        }
    }
}

/// One grid position and its solver state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Location of the cell
    pub position: Position,
    /// Labels still compatible with collapsed neighbours
    pub domain: Domain,
    /// The cell's own catalog, either the full catalog or an edge subset
    pub permitted: Domain,
    /// Chosen catalog index once collapsed
    pub chosen: Option<usize>,
    /// Seeded cells survive backtracking and restarts
    pub fixed: bool,
    /// Label last reported to the rendering observer
    pub displayed: Option<usize>,
}

impl Cell {
    /// Create an uncollapsed cell allowed to take any label of `permitted`
    pub fn new(position: Position, permitted: Domain) -> Self {
        Self {
            position,
            domain: permitted.clone(),
            permitted,
            chosen: None,
            fixed: false,
            displayed: None,
        }
    }

    /// Test whether a label has been chosen
    pub const fn is_collapsed(&self) -> bool {
        self.chosen.is_some()
    }
}

/// Dense grid of cells with fixed dimensions
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array3<Cell>,
    topology: Topology,
    catalog_size: usize,
}

impl Grid {
    /// Create a grid where every cell may take every label
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or exceeds `MAX_GRID_DIMENSION`,
    /// or if a planar grid is given a depth other than one
    pub fn new(dimensions: [usize; 3], topology: Topology, catalog_size: usize) -> Result<Self> {
        for &extent in &dimensions {
            if extent == 0 || extent > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    "dimensions",
                    &format!("{dimensions:?}"),
                    &format!("each extent must be in 1..={MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if topology == Topology::Planar && dimensions[2] != 1 {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{dimensions:?}"),
                &"planar grids have a depth of one",
            ));
        }

        let full = Domain::all(catalog_size);
        let cells = Array3::from_shape_fn((dimensions[0], dimensions[1], dimensions[2]), |(x, y, z)| {
            Cell::new([x, y, z], full.clone())
        });

        Ok(Self {
            cells,
            topology,
            catalog_size,
        })
    }

    /// Create a 4-connected `width x height` grid
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is out of range
    pub fn planar(width: usize, height: usize, catalog_size: usize) -> Result<Self> {
        Self::new([width, height, 1], Topology::Planar, catalog_size)
    }

    /// Create a 6-connected `width x height x depth` grid
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is out of range
    pub fn volumetric(
        width: usize,
        height: usize,
        depth: usize,
        catalog_size: usize,
    ) -> Result<Self> {
        Self::new([width, height, depth], Topology::Volumetric, catalog_size)
    }

    /// Extents along `[x, y, z]`
    pub fn dimensions(&self) -> [usize; 3] {
        let (x, y, z) = self.cells.dim();
        [x, y, z]
    }

    /// Connectivity of the grid
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of labels in the catalog the grid was built for
    pub const fn catalog_size(&self) -> usize {
        self.catalog_size
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, grids hold at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a position
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position)
    }

    /// Mutable cell at a position
    pub fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells.get_mut(position)
    }

    /// Cell at a position, failing when out of bounds
    ///
    /// # Errors
    ///
    /// Returns an error if the position lies outside the grid
    pub fn require(&self, position: Position) -> Result<&Cell> {
        let dimensions = self.dimensions();
        self.cells
            .get(position)
            .ok_or(SolverError::PositionOutOfBounds {
                position,
                dimensions,
            })
    }

    /// Mutable cell at a position, failing when out of bounds
    ///
    /// # Errors
    ///
    /// Returns an error if the position lies outside the grid
    pub fn require_mut(&mut self, position: Position) -> Result<&mut Cell> {
        let dimensions = self.dimensions();
        self.cells
            .get_mut(position)
            .ok_or(SolverError::PositionOutOfBounds {
                position,
                dimensions,
            })
    }

    /// Position one step away in a direction, if inside the grid
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let dimensions = self.dimensions();
        let offset = direction.offset();
        let mut next = [0; 3];
        for axis in 0..3 {
            let moved = position[axis].checked_add_signed(offset[axis])?;
            if moved >= dimensions[axis] {
                return None;
            }
            next[axis] = moved;
        }
        Some(next)
    }

    /// In-bounds neighbours under the grid's topology
    pub fn neighbors(&self, position: Position) -> Vec<(Direction, Position)> {
        self.topology
            .directions()
            .iter()
            .filter_map(|&direction| {
                self.neighbor(position, direction)
                    .map(|next| (direction, next))
            })
            .collect()
    }

    /// Test whether two positions share a face
    pub fn are_adjacent(&self, a: Position, b: Position) -> bool {
        self.neighbors(a).iter().any(|&(_, next)| next == b)
    }

    /// Test whether a position lies on the outer shell of the grid
    ///
    /// Planar grids ignore the depth axis.
    pub fn is_boundary(&self, position: Position) -> bool {
        let dimensions = self.dimensions();
        let axes = match self.topology {
            Topology::Planar => 2,
            Topology::Volumetric => 3,
        };
        (0..axes).any(|axis| position[axis] == 0 || position[axis] + 1 == dimensions[axis])
    }

    /// All positions in signature order (x outermost, then y, then z)
    pub fn positions(&self) -> Vec<Position> {
        self.cells.iter().map(|cell| cell.position).collect()
    }

    /// Iterate cells in signature order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate mutable cells in signature order
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Test whether every cell has a chosen label
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Narrow a cell's own catalog
    ///
    /// The cell's domain is intersected with the new catalog, and a chosen
    /// label outside it is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of bounds
    pub fn restrict(&mut self, position: Position, permitted: &Domain) -> Result<()> {
        let cell = self.require_mut(position)?;
        cell.permitted.intersect_with(permitted);
        cell.domain.intersect_with(permitted);
        if cell.chosen.is_some_and(|index| !cell.permitted.contains(index)) {
            cell.chosen = None;
        }
        Ok(())
    }

    /// Narrow the catalog of every boundary cell
    pub fn restrict_boundary(&mut self, permitted: &Domain) {
        let topology = self.topology;
        let dimensions = self.dimensions();
        let axes = match topology {
            Topology::Planar => 2,
            Topology::Volumetric => 3,
        };
        for cell in &mut self.cells {
            let on_boundary = (0..axes).any(|axis| {
                cell.position[axis] == 0 || cell.position[axis] + 1 == dimensions[axis]
            });
            if on_boundary {
                cell.permitted.intersect_with(permitted);
                cell.domain.intersect_with(permitted);
            }
        }
    }

    /// Collapse a cell to a label and mark it fixed
    ///
    /// Fixed cells keep their label through backtracking and restarts.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of bounds or the index lies
    /// outside the cell's own catalog
    pub fn fix(&mut self, position: Position, index: usize) -> Result<()> {
        let cell = self.require_mut(position)?;
        if !cell.permitted.contains(index) {
            return Err(SolverError::LabelNotPermitted {
                label: index.to_string(),
                position,
            });
        }
        cell.chosen = Some(index);
        cell.fixed = true;
        cell.domain = Domain::from_indices(&[index], cell.permitted.capacity());
        Ok(())
    }

    /// Chosen catalog indices laid out as an `[x, y, z]` array
    pub fn chosen_indices(&self) -> Array3<Option<usize>> {
        self.cells.map(|cell| cell.chosen)
    }
}
