//! A rectangular grid with 4-connectivity.

use crate::{Topology, TopologyError};

/// A cell of a [`RectTopology`], identified by column `x` and row `y`.
///
/// Positions order lexicographically by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("({x}, {y})")]
pub struct RectPosition {
    x: usize,
    y: usize,
}

impl RectPosition {
    /// Creates a position from its column and row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the column.
    #[must_use]
    pub const fn x(self) -> usize {
        self.x
    }

    /// Returns the row.
    #[must_use]
    pub const fn y(self) -> usize {
        self.y
    }
}

/// A `width × height` rectangle.
///
/// Positions are enumerated row by row (`x` fastest), starting at `(0, 0)`.
/// Each position is adjacent to its left, right, upper and lower neighbor.
///
/// # Examples
///
/// ```
/// use teselace_core::{RectPosition, RectTopology, Topology as _};
///
/// let rect = RectTopology::new(3, 2)?;
/// let order: Vec<_> = rect.all_positions().collect();
/// assert_eq!(order[0], RectPosition::new(0, 0));
/// assert_eq!(order[3], RectPosition::new(0, 1));
///
/// let corner: Vec<_> = rect.neighbors(RectPosition::new(0, 0)).collect();
/// assert_eq!(corner.len(), 2);
/// # Ok::<(), teselace_core::TopologyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RectTopology {
    width: usize,
    height: usize,
}

impl RectTopology {
    /// Creates a rectangle topology.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EmptyRectangle`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, TopologyError> {
        if width == 0 || height == 0 {
            return Err(TopologyError::EmptyRectangle { width, height });
        }
        Ok(Self { width, height })
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, pos: RectPosition, dx: isize, dy: isize) -> Option<RectPosition> {
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        (x < self.width && y < self.height).then_some(RectPosition { x, y })
    }
}

impl Topology for RectTopology {
    type Position = RectPosition;

    const DIMENSIONS: usize = 2;

    fn total_positions(&self) -> usize {
        self.width * self.height
    }

    fn initial_position(&self) -> RectPosition {
        RectPosition::new(0, 0)
    }

    fn next_position(&self, pos: RectPosition) -> Option<RectPosition> {
        if pos.x + 1 < self.width {
            return Some(RectPosition::new(pos.x + 1, pos.y));
        }
        if pos.y + 1 < self.height {
            return Some(RectPosition::new(0, pos.y + 1));
        }
        None
    }

    fn neighbors(&self, pos: RectPosition) -> impl Iterator<Item = RectPosition> {
        const OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        OFFSETS
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(pos, dx, dy))
    }

    fn index(&self, pos: RectPosition) -> usize {
        debug_assert!(pos.x < self.width && pos.y < self.height);
        pos.y * self.width + pos.x
    }

    #[expect(clippy::cast_possible_wrap)]
    fn coordinates(&self, pos: RectPosition) -> [i64; 3] {
        [pos.x as i64, pos.y as i64, 0]
    }
}
