use teselace_core::{StateGrid, Topology};

use super::ConstraintWatcher;

/// The two ends of a simple path.
///
/// A path of a single position has both ends on that position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathEnds<P> {
    /// The end extended by the first growth step.
    pub first: P,
    /// The other end.
    pub second: P,
}

/// Keeps a block shaped as a simple path.
///
/// A candidate is accepted only if exactly one of its neighbors already belongs
/// to the block and that neighbor is one of the two path ends. The touched end
/// then moves onto the candidate.
///
/// # Examples
///
/// ```
/// use teselace_core::{CellState, RectPosition, RectTopology, StateGrid};
/// use teselace_coverer::constraint::{ConstraintWatcher as _, PathWatcher};
///
/// let mut grid = StateGrid::new(RectTopology::new(3, 3)?);
/// let start = RectPosition::new(1, 1);
/// grid.set(start, CellState::Placeholder);
///
/// let mut watcher = PathWatcher::new(start);
/// assert!(watcher.check_position(&grid, RectPosition::new(1, 0)));
/// // not adjacent to the block at all
/// assert!(!watcher.check_position(&grid, RectPosition::new(0, 0)));
/// # Ok::<(), teselace_core::TopologyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathWatcher<T: Topology> {
    ends: PathEnds<T::Position>,
    checkpoints: Vec<PathEnds<T::Position>>,
}

impl<T: Topology> PathWatcher<T> {
    /// Creates a watcher for a path starting at `start`, with one checkpoint.
    #[must_use]
    pub fn new(start: T::Position) -> Self {
        let ends = PathEnds {
            first: start,
            second: start,
        };
        Self {
            ends,
            checkpoints: vec![ends],
        }
    }

    /// Returns the current path ends.
    #[must_use]
    pub fn ends(&self) -> PathEnds<T::Position> {
        self.ends
    }

    /// Returns the number of saved checkpoints.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    fn restore(&mut self) {
        if let Some(&ends) = self.checkpoints.last() {
            self.ends = ends;
        }
    }
}

impl<T: Topology> ConstraintWatcher for PathWatcher<T> {
    type Topology = T;

    fn check_position(&mut self, grid: &StateGrid<T>, pos: T::Position) -> bool {
        self.restore();

        let mut attached = grid
            .topology()
            .neighbors(pos)
            .filter(|&neighbor| grid[neighbor].is_placeholder());
        let Some(neighbor) = attached.next() else {
            return false;
        };
        // a second attachment point would close a cycle or branch the path
        if attached.next().is_some() {
            return false;
        }

        if neighbor == self.ends.first {
            self.ends.first = pos;
            return true;
        }
        if neighbor == self.ends.second {
            self.ends.second = pos;
            return true;
        }
        false
    }

    fn commit(&mut self) {
        self.checkpoints.push(self.ends);
    }

    fn rollback_state(&mut self) {
        self.checkpoints.pop();
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use teselace_core::{CellState, RectPosition, RectTopology};

    use super::*;

    const START: RectPosition = RectPosition::new(0, 0);

    fn setup() -> (StateGrid<RectTopology>, PathWatcher<RectTopology>) {
        let mut grid = StateGrid::new(RectTopology::new(4, 4).unwrap());
        grid.set(START, CellState::Placeholder);
        (grid, PathWatcher::new(START))
    }

    #[track_caller]
    fn insert_checked(
        grid: &mut StateGrid<RectTopology>,
        watcher: &mut PathWatcher<RectTopology>,
        pos: RectPosition,
        expected: bool,
    ) {
        let accepted = watcher.check_position(grid, pos);
        assert_eq!(accepted, expected, "check_position({pos})");
        if accepted {
            grid.set(pos, CellState::Placeholder);
            watcher.commit();
        }
    }

    #[test]
    fn test_extends_path_end() {
        let (mut grid, mut watcher) = setup();
        insert_checked(&mut grid, &mut watcher, RectPosition::new(0, 1), true);
        insert_checked(&mut grid, &mut watcher, RectPosition::new(0, 2), true);
        insert_checked(&mut grid, &mut watcher, RectPosition::new(0, 3), true);

        assert_eq!(
            watcher.ends(),
            PathEnds {
                first: RectPosition::new(0, 3),
                second: START,
            }
        );
    }

    #[test]
    fn test_rejects_branch() {
        let (mut grid, mut watcher) = setup();
        insert_checked(&mut grid, &mut watcher, RectPosition::new(0, 1), true);
        insert_checked(&mut grid, &mut watcher, RectPosition::new(0, 2), true);
        // (1, 1) touches the middle of the path
        insert_checked(&mut grid, &mut watcher, RectPosition::new(1, 1), false);
    }

    #[test]
    fn test_extends_both_ends() {
        let (mut grid, mut watcher) = setup();
        insert_checked(&mut grid, &mut watcher, RectPosition::new(0, 1), true);
        insert_checked(&mut grid, &mut watcher, RectPosition::new(1, 0), true);

        assert_eq!(
            watcher.ends(),
            PathEnds {
                first: RectPosition::new(0, 1),
                second: RectPosition::new(1, 0),
            }
        );
    }

    #[test]
    fn test_rejects_position_touching_two_members() {
        let (mut grid, mut watcher) = setup();
        insert_checked(&mut grid, &mut watcher, RectPosition::new(0, 1), true);
        insert_checked(&mut grid, &mut watcher, RectPosition::new(1, 0), true);
        // (1, 1) touches both ends, which would close a cycle
        insert_checked(&mut grid, &mut watcher, RectPosition::new(1, 1), false);
    }

    #[test]
    fn test_rejected_check_does_not_leak_into_next_check() {
        let (mut grid, mut watcher) = setup();
        insert_checked(&mut grid, &mut watcher, RectPosition::new(0, 1), true);

        // accepted but never committed
        assert!(watcher.check_position(&grid, RectPosition::new(0, 2)));
        // checking again restarts from the committed ends
        assert!(watcher.check_position(&grid, RectPosition::new(1, 1)));
        assert_eq!(watcher.ends().first, RectPosition::new(1, 1));
    }

    #[test]
    fn test_rollback_state() {
        let (mut grid, mut watcher) = setup();
        for pos in [
            RectPosition::new(0, 1),
            RectPosition::new(0, 2),
            RectPosition::new(0, 3),
        ] {
            insert_checked(&mut grid, &mut watcher, pos, true);
        }

        watcher.rollback_state();
        grid.set(RectPosition::new(0, 3), CellState::Empty);
        watcher.rollback_state();
        grid.set(RectPosition::new(0, 2), CellState::Empty);

        // the end is back on (0, 1), so (1, 1) extends it
        insert_checked(&mut grid, &mut watcher, RectPosition::new(1, 1), true);
    }

    #[test]
    fn test_rollback_restores_initial_state() {
        let (mut grid, mut watcher) = setup();
        let initial = watcher.clone();

        for pos in [RectPosition::new(1, 0), RectPosition::new(2, 0)] {
            insert_checked(&mut grid, &mut watcher, pos, true);
        }
        watcher.rollback_state();
        watcher.rollback_state();

        assert_eq!(watcher, initial);
    }
}
