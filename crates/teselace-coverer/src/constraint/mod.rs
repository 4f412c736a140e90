//! Shape constraints applied while a block grows.
//!
//! A constraint watcher decides, one position at a time, whether appending a
//! position to the block under construction keeps the block's shape valid. It
//! keeps a stack of checkpoints, one per accepted position, so that it can
//! follow the block search as it backtracks:
//!
//! 1. [`check_position`](ConstraintWatcher::check_position) restores the last
//!    checkpoint and evaluates a candidate, updating the working state.
//! 2. [`commit`](ConstraintWatcher::commit) pushes the working state as a new
//!    checkpoint once every watcher accepted the candidate.
//! 3. [`rollback_state`](ConstraintWatcher::rollback_state) pops a checkpoint
//!    when the search gives the position up again.
//!
//! Watchers are created fresh for every growth attempt and discarded afterwards.

use teselace_core::{StateGrid, Topology};

pub use self::{
    path::{PathEnds, PathWatcher},
    planar::{Plane, PlanarState, PlanarWatcher, Vector3},
};

mod path;
mod planar;

/// The shape rules a model can enforce on its blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ConstraintKind {
    /// Every block is a simple path.
    #[display("path")]
    Path,
    /// Every block lies in one plane.
    #[display("planar")]
    Planar,
}

impl ConstraintKind {
    /// All constraint kinds.
    pub const ALL: [Self; 2] = [Self::Path, Self::Planar];

    /// Returns the smallest topology dimension the constraint is meaningful in.
    #[must_use]
    pub const fn min_dimensions(self) -> usize {
        match self {
            ConstraintKind::Path => 1,
            ConstraintKind::Planar => 3,
        }
    }

    /// Creates a watcher for a block starting at `start`.
    #[must_use]
    pub fn watcher<T: Topology>(self, topology: &T, start: T::Position) -> Watcher<T> {
        match self {
            ConstraintKind::Path => Watcher::Path(PathWatcher::new(start)),
            ConstraintKind::Planar => Watcher::Planar(PlanarWatcher::new(topology, start)),
        }
    }
}

/// An incremental, checkpointed validator of a block shape rule.
///
/// The grid passed to [`check_position`](Self::check_position) is the working
/// copy of the block search: members of the block under construction are marked
/// [`CellState::Placeholder`](teselace_core::CellState::Placeholder) there, and
/// the candidate itself is still empty.
pub trait ConstraintWatcher {
    /// The topology the watched block lives in.
    type Topology: Topology;

    /// Returns `true` if appending `pos` keeps the constraint satisfied.
    ///
    /// Restores the last checkpoint first, so repeated checks against the same
    /// checkpoint are independent of each other.
    fn check_position(
        &mut self,
        grid: &StateGrid<Self::Topology>,
        pos: <Self::Topology as Topology>::Position,
    ) -> bool;

    /// Saves the state reached by the last successful check as a new checkpoint.
    fn commit(&mut self);

    /// Drops the latest checkpoint and returns to the one before it.
    fn rollback_state(&mut self);
}

/// A watcher for any [`ConstraintKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Watcher<T: Topology> {
    /// See [`PathWatcher`].
    Path(PathWatcher<T>),
    /// See [`PlanarWatcher`].
    Planar(PlanarWatcher<T>),
}

impl<T: Topology> ConstraintWatcher for Watcher<T> {
    type Topology = T;

    fn check_position(&mut self, grid: &StateGrid<T>, pos: T::Position) -> bool {
        match self {
            Watcher::Path(watcher) => watcher.check_position(grid, pos),
            Watcher::Planar(watcher) => watcher.check_position(grid, pos),
        }
    }

    fn commit(&mut self) {
        match self {
            Watcher::Path(watcher) => watcher.commit(),
            Watcher::Planar(watcher) => watcher.commit(),
        }
    }

    fn rollback_state(&mut self) {
        match self {
            Watcher::Path(watcher) => watcher.rollback_state(),
            Watcher::Planar(watcher) => watcher.rollback_state(),
        }
    }
}
