//! The abstract position space the covering engine works on.
//!
//! A [`Topology`] is a finite set of positions with
//!
//! - a canonical total order ([`initial_position`] / [`next_position`]), used for
//!   sequential scans such as "the next empty position",
//! - a dense index (`0..total_positions()`) consistent with that order, used to
//!   back [`StateGrid`] with a flat vector,
//! - an adjacency relation ([`neighbors`]), and
//! - integer lattice coordinates ([`coordinates`]) for geometric constraints.
//!
//! The engine is generic over this trait and never inspects coordinates except
//! through it.
//!
//! [`initial_position`]: Topology::initial_position
//! [`next_position`]: Topology::next_position
//! [`neighbors`]: Topology::neighbors
//! [`coordinates`]: Topology::coordinates
//! [`StateGrid`]: crate::StateGrid

use std::{
    fmt::{Debug, Display},
    hash::Hash,
    iter::FusedIterator,
};

/// A finite discrete space that can be covered with blocks.
///
/// Implementations must guarantee:
///
/// - [`all_positions`](Self::all_positions) yields exactly
///   [`total_positions`](Self::total_positions) distinct positions,
/// - [`index`](Self::index) maps the `i`-th enumerated position to `i`,
/// - adjacency is symmetric and never yields positions outside the space.
///
/// Passing a position that does not belong to the space is a programmer error;
/// implementations may panic or return garbage.
pub trait Topology: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// The coordinate tuple identifying one position.
    type Position: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static;

    /// Number of spatial dimensions of the lattice (2 or 3).
    const DIMENSIONS: usize;

    /// Returns the exact number of valid positions.
    fn total_positions(&self) -> usize;

    /// Returns the first position of the canonical order.
    fn initial_position(&self) -> Self::Position;

    /// Returns the position following `pos` in the canonical order, or `None`
    /// after the last one.
    fn next_position(&self, pos: Self::Position) -> Option<Self::Position>;

    /// Returns every position adjacent to `pos`.
    fn neighbors(&self, pos: Self::Position) -> impl Iterator<Item = Self::Position>;

    /// Returns the rank of `pos` in the canonical order.
    fn index(&self, pos: Self::Position) -> usize;

    /// Returns the lattice coordinates of `pos`, padded with zeros to three axes.
    fn coordinates(&self, pos: Self::Position) -> [i64; 3];

    /// Returns an iterator over all positions in canonical order.
    fn all_positions(&self) -> AllPositions<'_, Self> {
        AllPositions {
            topology: self,
            next: Some(self.initial_position()),
        }
    }
}

/// Iterator over every position of a [`Topology`] in canonical order.
///
/// Created by [`Topology::all_positions`].
#[derive(Debug, Clone)]
pub struct AllPositions<'a, T: Topology> {
    topology: &'a T,
    next: Option<T::Position>,
}

impl<T: Topology> Iterator for AllPositions<'_, T> {
    type Item = T::Position;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.next?;
        self.next = self.topology.next_position(pos);
        Some(pos)
    }
}

impl<T: Topology> FusedIterator for AllPositions<'_, T> {}
