//! Pruning of partial coverings that can no longer be completed.

use teselace_core::{StateGrid, Topology};

use crate::BlockSizes;

/// Returns the sizes of the maximal connected regions of empty positions.
///
/// Placeholders count as occupied, so the result describes what would remain
/// if the block under construction were committed. Regions are reported in the
/// canonical order of their first position.
#[must_use]
pub fn empty_component_sizes<T: Topology>(grid: &StateGrid<T>) -> Vec<usize> {
    let topology = grid.topology();
    let mut visited = vec![false; topology.total_positions()];
    let mut stack = Vec::new();
    let mut sizes = Vec::new();

    for (start, cell) in grid.iter() {
        if !cell.is_empty() || visited[topology.index(start)] {
            continue;
        }
        visited[topology.index(start)] = true;
        stack.push(start);

        let mut size = 0;
        while let Some(pos) = stack.pop() {
            size += 1;
            for neighbor in topology.neighbors(pos) {
                let index = topology.index(neighbor);
                if !visited[index] && grid[neighbor].is_empty() {
                    visited[index] = true;
                    stack.push(neighbor);
                }
            }
        }
        sizes.push(size);
    }
    sizes
}

/// Returns `false` if some empty region provably cannot be covered.
///
/// With a fixed block size every region must be a multiple of it. With a size
/// range every region must merely fit one smallest block, so `true` does not
/// guarantee that a covering exists.
///
/// # Examples
///
/// ```
/// use teselace_core::{BlockNumber, CellState, RectPosition, RectTopology, StateGrid};
/// use teselace_coverer::{BlockSizes, finishable::is_finishable};
///
/// let mut grid = StateGrid::new(RectTopology::new(4, 2)?);
/// let sizes = BlockSizes::fixed(2)?;
/// assert!(is_finishable(&grid, sizes));
///
/// // two walls cut off the corner cell (0, 0)
/// let wall = CellState::Block(BlockNumber::new(1));
/// grid.set(RectPosition::new(1, 0), wall);
/// grid.set(RectPosition::new(0, 1), wall);
/// assert!(!is_finishable(&grid, sizes));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn is_finishable<T: Topology>(grid: &StateGrid<T>, sizes: BlockSizes) -> bool {
    empty_component_sizes(grid)
        .into_iter()
        .all(|size| sizes.admits_region(size))
}
