//! A tetrahedral pyramid of spheres.
//!
//! The pyramid of size `n` is a stack of `n` triangular layers. Layer `z`
//! (counted from the base) is a triangle with side `n - z`; within a layer,
//! row `y` holds `n - z - y` positions. The total count is the tetrahedral
//! number `n (n + 1) (n + 2) / 6`.
//!
//! Each position touches up to six neighbors in its own layer, three in the
//! layer above and three in the layer below.

use crate::{Topology, TopologyError};

/// A sphere of a [`PyramidTopology`], identified by lattice coordinates.
///
/// Positions order lexicographically by `(x, y, z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("({x}, {y}, {z})")]
pub struct PyramidPosition {
    x: usize,
    y: usize,
    z: usize,
}

impl PyramidPosition {
    /// Creates a position from lattice coordinates.
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Returns the position within the row.
    #[must_use]
    pub const fn x(self) -> usize {
        self.x
    }

    /// Returns the row within the layer.
    #[must_use]
    pub const fn y(self) -> usize {
        self.y
    }

    /// Returns the layer, `0` being the base.
    #[must_use]
    pub const fn z(self) -> usize {
        self.z
    }
}

const NEIGHBOR_OFFSETS: [(isize, isize, isize); 12] = [
    // same layer
    (0, 1, 0),
    (1, 0, 0),
    (1, -1, 0),
    (0, -1, 0),
    (-1, 0, 0),
    (-1, 1, 0),
    // above
    (0, -1, 1),
    (-1, 0, 1),
    (0, 0, 1),
    // below
    (0, 0, -1),
    (1, 0, -1),
    (0, 1, -1),
];

/// A tetrahedral pyramid with `size` layers.
///
/// # Examples
///
/// ```
/// use teselace_core::{PyramidPosition, PyramidTopology, Topology as _};
///
/// let pyramid = PyramidTopology::new(3)?;
/// assert_eq!(pyramid.total_positions(), 10);
///
/// // The apex has only the three spheres below it as neighbors.
/// let apex = PyramidPosition::new(0, 0, 2);
/// assert_eq!(pyramid.neighbors(apex).count(), 3);
/// # Ok::<(), teselace_core::TopologyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PyramidTopology {
    size: usize,
}

impl PyramidTopology {
    /// Creates a pyramid with `size` layers.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EmptyPyramid`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, TopologyError> {
        if size == 0 {
            return Err(TopologyError::EmptyPyramid);
        }
        Ok(Self { size })
    }

    /// Returns the number of layers (and the side of the base triangle).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the side of the triangle forming layer `z`.
    #[must_use]
    pub const fn layer_size(&self, z: usize) -> usize {
        self.size.saturating_sub(z)
    }

    /// Returns `true` if the coordinates lie inside the pyramid.
    #[must_use]
    pub const fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        z < self.size && x < self.size - z && y < self.size - z - x
    }

    fn offset(&self, pos: PyramidPosition, (dx, dy, dz): (isize, isize, isize)) -> Option<PyramidPosition> {
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        let z = pos.z.checked_add_signed(dz)?;
        self.contains(x, y, z).then_some(PyramidPosition { x, y, z })
    }
}

const fn tetrahedral(n: usize) -> usize {
    n * (n + 1) * (n + 2) / 6
}

impl Topology for PyramidTopology {
    type Position = PyramidPosition;

    const DIMENSIONS: usize = 3;

    fn total_positions(&self) -> usize {
        tetrahedral(self.size)
    }

    fn initial_position(&self) -> PyramidPosition {
        PyramidPosition::new(0, 0, 0)
    }

    fn next_position(&self, pos: PyramidPosition) -> Option<PyramidPosition> {
        let PyramidPosition { x, y, z } = pos;
        [(x + 1, y, z), (0, y + 1, z), (0, 0, z + 1)]
            .into_iter()
            .find(|&(x, y, z)| self.contains(x, y, z))
            .map(|(x, y, z)| PyramidPosition::new(x, y, z))
    }

    fn neighbors(&self, pos: PyramidPosition) -> impl Iterator<Item = PyramidPosition> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |offset| self.offset(pos, offset))
    }

    fn index(&self, pos: PyramidPosition) -> usize {
        debug_assert!(self.contains(pos.x, pos.y, pos.z));
        let layer = self.layer_size(pos.z);
        let before_layer = tetrahedral(self.size) - tetrahedral(layer);
        let before_row = pos.y * layer - pos.y * pos.y.saturating_sub(1) / 2;
        before_layer + before_row + pos.x
    }

    #[expect(clippy::cast_possible_wrap)]
    fn coordinates(&self, pos: PyramidPosition) -> [i64; 3] {
        [pos.x as i64, pos.y as i64, pos.z as i64]
    }
}
