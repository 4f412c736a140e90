//! Randomized search for one block starting at a given position.

use std::{collections::BTreeSet, vec};

use rand::{Rng, seq::SliceRandom as _};
use teselace_core::{CellState, StateGrid, Topology};

use crate::{
    BlockSizes, CoverError,
    cancel::Interrupt,
    constraint::{ConstraintKind, ConstraintWatcher as _, Watcher},
    finishable::is_finishable,
};

/// One randomized block search over a snapshot of the model grid.
///
/// The search never touches the grid it was created from. Every growth attempt
/// clones it into a working copy, marks the members of the candidate block as
/// [`CellState::Placeholder`] there, and throws the copy away afterwards.
pub(crate) struct BlockSearch<'a, T: Topology, R: ?Sized> {
    pub(crate) grid: &'a StateGrid<T>,
    pub(crate) sizes: BlockSizes,
    pub(crate) constraints: &'a [ConstraintKind],
    pub(crate) check_finishable: bool,
    pub(crate) interrupt: &'a Interrupt,
    pub(crate) rng: &'a mut R,
}

impl<T, R> BlockSearch<'_, T, R>
where
    T: Topology,
    R: Rng + ?Sized,
{
    /// Finds a block containing `start`, in growth order.
    ///
    /// Block sizes are tried in random order; the first size for which a valid
    /// shape exists wins.
    ///
    /// # Errors
    ///
    /// Returns [`CoverError::ImpossibleToFinish`] if no allowed size yields a
    /// block, or the cancellation outcome if the search was interrupted.
    pub(crate) fn random_block(&mut self, start: T::Position) -> Result<Vec<T::Position>, CoverError> {
        let mut sizes = self.sizes.iter().collect::<Vec<_>>();
        sizes.shuffle(&mut *self.rng);

        for size in sizes {
            log::debug!("looking for a block of size {size} at {start}");
            if let Some(block) = self.grow(start, size)? {
                return Ok(block);
            }
        }
        Err(CoverError::ImpossibleToFinish)
    }

    /// Exhaustively grows connected blocks of exactly `size` positions from `start`.
    ///
    /// Backtracks over an explicit stack of candidate iterators, one per block
    /// member. Constraint watchers follow the stack checkpoint by checkpoint.
    fn grow(&mut self, start: T::Position, size: usize) -> Result<Option<Vec<T::Position>>, CoverError> {
        let mut working = self.grid.clone();
        working.set(start, CellState::Placeholder);
        let mut block = vec![start];

        if size == 1 {
            return Ok(self.is_acceptable(&working).then_some(block));
        }

        let topology = working.topology().clone();
        let mut watchers = self
            .constraints
            .iter()
            .map(|kind| kind.watcher(&topology, start))
            .collect::<Vec<_>>();
        let mut frames = vec![self.candidates(&working, &block)];

        loop {
            self.interrupt.check()?;

            let Some(frame) = frames.last_mut() else {
                return Ok(None);
            };
            let Some(pos) = frame.next() else {
                frames.pop();
                if frames.is_empty() {
                    return Ok(None);
                }
                if let Some(last) = block.pop() {
                    working.set(last, CellState::Empty);
                }
                rollback(&mut watchers);
                continue;
            };

            if !watchers.iter_mut().all(|watcher| watcher.check_position(&working, pos)) {
                continue;
            }
            for watcher in &mut watchers {
                watcher.commit();
            }
            working.set(pos, CellState::Placeholder);
            block.push(pos);

            if block.len() < size {
                frames.push(self.candidates(&working, &block));
                continue;
            }

            if self.is_acceptable(&working) {
                return Ok(Some(block));
            }
            log::debug!("block ending at {pos} leaves an unfinishable region, trying another one");
            block.pop();
            working.set(pos, CellState::Empty);
            rollback(&mut watchers);
        }
    }

    fn is_acceptable(&self, working: &StateGrid<T>) -> bool {
        !self.check_finishable || is_finishable(working, self.sizes)
    }

    /// Returns the empty neighbors of the block in random order.
    fn candidates(
        &mut self,
        working: &StateGrid<T>,
        block: &[T::Position],
    ) -> vec::IntoIter<T::Position> {
        let topology = working.topology();
        let neighbors = block
            .iter()
            .flat_map(|&pos| topology.neighbors(pos))
            .filter(|&pos| working[pos].is_empty())
            .collect::<BTreeSet<_>>();

        let mut candidates = neighbors.into_iter().collect::<Vec<_>>();
        candidates.shuffle(&mut *self.rng);
        candidates.into_iter()
    }
}

fn rollback<T: Topology>(watchers: &mut [Watcher<T>]) {
    for watcher in watchers {
        watcher.rollback_state();
    }
}
