//! Committed blocks of a covering.

use crate::Color;

/// The sequential number of a committed block, starting at 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("{_0}")]
pub struct BlockNumber(usize);

impl BlockNumber {
    /// Creates a block number.
    ///
    /// # Panics
    ///
    /// Panics if `number` is zero.
    #[must_use]
    pub const fn new(number: usize) -> Self {
        assert!(number > 0, "block numbers start at 1");
        Self(number)
    }

    /// Returns the number as an integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// A connected group of positions forming one tile of a covering.
///
/// The number and color are fixed when the block is committed; the
/// visibility flag is purely cosmetic and may be toggled freely by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<P> {
    number: BlockNumber,
    positions: Vec<P>,
    color: Color,
    visible: bool,
}

impl<P> Block<P> {
    /// Creates a visible block.
    #[must_use]
    pub fn new(number: BlockNumber, positions: Vec<P>, color: Color) -> Self {
        Self {
            number,
            positions,
            color,
            visible: true,
        }
    }

    /// Returns the block number.
    #[must_use]
    pub fn number(&self) -> BlockNumber {
        self.number
    }

    /// Returns the owned positions in the order they were grown.
    #[must_use]
    pub fn positions(&self) -> &[P] {
        &self.positions
    }

    /// Returns the number of owned positions.
    #[must_use]
    pub fn size(&self) -> usize {
        self.positions.len()
    }

    /// Returns the display color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` if the block should be drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the block.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl<P: PartialEq> Block<P> {
    /// Returns `true` if the block owns `pos`.
    #[must_use]
    pub fn contains(&self, pos: &P) -> bool {
        self.positions.contains(pos)
    }
}
