//! Per-position state of a covering in progress.

use std::ops::Index;

use crate::{BlockNumber, Topology};

/// What a single position currently holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum CellState {
    /// Not covered by anything.
    #[default]
    Empty,
    /// Tentatively occupied by the block currently under construction.
    ///
    /// Only ever observed on the working copies used while searching for a block.
    Placeholder,
    /// Owned by the committed block with the given number.
    Block(BlockNumber),
}

impl CellState {
    /// Returns the owning block number, if the position is covered by a committed block.
    #[must_use]
    pub const fn block_number(self) -> Option<BlockNumber> {
        match self {
            CellState::Block(number) => Some(number),
            CellState::Empty | CellState::Placeholder => None,
        }
    }
}

/// A mapping from every position of a topology to its [`CellState`].
///
/// Cells are stored in a flat vector indexed by [`Topology::index`], so cloning
/// the grid is a single bulk copy. Block search relies on this to work on
/// throwaway copies instead of logging undo information.
///
/// # Examples
///
/// ```
/// use teselace_core::{CellState, PyramidPosition, PyramidTopology, StateGrid};
///
/// let mut grid = StateGrid::new(PyramidTopology::new(2)?);
/// let apex = PyramidPosition::new(0, 0, 1);
///
/// let mut working = grid.clone();
/// working.set(apex, CellState::Placeholder);
///
/// assert!(working[apex].is_placeholder());
/// assert!(grid[apex].is_empty());
/// # Ok::<(), teselace_core::TopologyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateGrid<T: Topology> {
    topology: T,
    cells: Vec<CellState>,
}

impl<T: Topology> StateGrid<T> {
    /// Creates a grid with every position [`CellState::Empty`].
    #[must_use]
    pub fn new(topology: T) -> Self {
        let cells = vec![CellState::Empty; topology.total_positions()];
        Self { topology, cells }
    }

    /// Returns the topology the grid is laid out on.
    #[must_use]
    pub fn topology(&self) -> &T {
        &self.topology
    }

    /// Returns the state at `pos`.
    #[must_use]
    #[inline]
    pub fn get(&self, pos: T::Position) -> CellState {
        self.cells[self.topology.index(pos)]
    }

    /// Overwrites the state at `pos`.
    #[inline]
    pub fn set(&mut self, pos: T::Position, value: CellState) {
        let index = self.topology.index(pos);
        self.cells[index] = value;
    }

    /// Marks every position empty again.
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    /// Replaces the topology and marks every position of the new layout empty.
    pub fn reset_with(&mut self, topology: T) {
        self.cells.clear();
        self.cells.resize(topology.total_positions(), CellState::Empty);
        self.topology = topology;
    }

    /// Returns the number of positions currently [`CellState::Empty`].
    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Returns an iterator over `(position, state)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (T::Position, CellState)> + '_ {
        self.topology
            .all_positions()
            .map(|pos| (pos, self.get(pos)))
    }
}

impl<T: Topology> Index<T::Position> for StateGrid<T> {
    type Output = CellState;

    fn index(&self, pos: T::Position) -> &CellState {
        &self.cells[self.topology.index(pos)]
    }
}
