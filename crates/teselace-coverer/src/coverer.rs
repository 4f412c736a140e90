//! Backtracking over whole blocks.
//!
//! The coverer keeps one frame per committed block. A frame remembers where its
//! block starts and which shapes were already tried there and led into dead
//! ends. Since the number of shapes at a position is unknown and too costly to
//! enumerate, a frame gives up after [`BLOCK_ATTEMPTS`] random draws in a row
//! that only produced shapes it had already tried.

use std::collections::BTreeSet;

use teselace_core::Topology;

use crate::{CoverError, CoveringModel, cancel::Interrupt};

/// Random block draws per frame before the frame is declared a dead end.
pub const BLOCK_ATTEMPTS: usize = 100;

#[derive(Debug)]
struct Frame<P> {
    /// Sorted position lists of blocks that led into dead ends.
    used: BTreeSet<Vec<P>>,
    /// Sorted position list of the block currently committed for this frame.
    last: Option<Vec<P>>,
    start: P,
}

impl<P> Frame<P> {
    fn new(start: P) -> Self {
        Self {
            used: BTreeSet::new(),
            last: None,
            start,
        }
    }
}

/// Covers an empty model completely.
///
/// On error the model is left partially covered; the caller resets it.
pub(crate) fn cover<T: Topology>(
    model: &mut CoveringModel<T>,
    check_finishable: bool,
    interrupt: &Interrupt,
) -> Result<(), CoverError> {
    let mut frames = vec![Frame::new(model.topology().initial_position())];

    while let Some(frame) = frames.last_mut() {
        interrupt.check()?;

        let start = frame.start;
        let Some((positions, key)) =
            random_unused_block(model, &frame.used, start, check_finishable, interrupt)?
        else {
            log::debug!("no unused block left at {start}, backtracking");
            frames.pop();
            let Some(parent) = frames.last_mut() else {
                break;
            };
            if let Some(last) = parent.last.take() {
                parent.used.insert(last);
            }
            model.pop_block();
            continue;
        };

        frame.last = Some(key);
        let number = model.add_block(positions);
        log::debug!(
            "added block {number} at {start}, {} positions left",
            model.empty_positions()
        );

        if model.is_filled() {
            return Ok(());
        }
        let next = model
            .next_empty(start)
            .ok_or(CoverError::ImpossibleToFinish)?;
        frames.push(Frame::new(next));
    }

    Err(CoverError::ImpossibleToFinish)
}

/// Draws blocks at `start` until one is found that is not in `used`.
///
/// Returns the block in growth order together with its sorted key.
fn random_unused_block<T: Topology>(
    model: &mut CoveringModel<T>,
    used: &BTreeSet<Vec<T::Position>>,
    start: T::Position,
    check_finishable: bool,
    interrupt: &Interrupt,
) -> Result<Option<(Vec<T::Position>, Vec<T::Position>)>, CoverError> {
    for _ in 0..BLOCK_ATTEMPTS {
        let positions = match model.search_block(start, check_finishable, interrupt) {
            Ok(positions) => positions,
            Err(CoverError::ImpossibleToFinish) => return Ok(None),
            Err(err) => return Err(err),
        };

        let mut key = positions.clone();
        key.sort_unstable();
        if !used.contains(&key) {
            return Ok(Some((positions, key)));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use teselace_core::{RectPosition, RectTopology};

    use super::*;
    use crate::{BlockSizes, CancelToken, CoveringConfig, CoveringSeed, testing::CoveringChecker};

    fn model(width: usize, height: usize, size: usize) -> CoveringModel<RectTopology> {
        let config = CoveringConfig::new(BlockSizes::fixed(size).unwrap());
        CoveringModel::with_seed(
            RectTopology::new(width, height).unwrap(),
            config,
            CoveringSeed::from_phrase("coverer"),
        )
        .unwrap()
    }

    fn no_interrupt() -> Interrupt {
        Interrupt::new(CancelToken::new(), None)
    }

    #[test]
    fn test_cover_fills_model() {
        let mut model = model(6, 4, 3);
        cover(&mut model, true, &no_interrupt()).unwrap();

        CoveringChecker::new(&model)
            .assert_filled()
            .assert_partition()
            .assert_block_sizes()
            .assert_connected()
            .assert_block_count(8);
    }

    #[test]
    fn test_cover_without_finishability_check() {
        // a 1xN strip can only be covered one way, so backtracking alone must find it
        let mut model = model(8, 1, 2);
        cover(&mut model, false, &no_interrupt()).unwrap();

        CoveringChecker::new(&model)
            .assert_filled()
            .assert_partition()
            .assert_block_count(4);
    }

    #[test]
    fn test_blocks_start_at_first_empty_position() {
        let mut model = model(4, 4, 4);
        cover(&mut model, true, &no_interrupt()).unwrap();

        let mut covered = BTreeSet::new();
        for block in model.blocks() {
            let first_empty = model
                .all_positions()
                .find(|pos| !covered.contains(pos))
                .unwrap();
            assert_eq!(block.positions()[0], first_empty);
            covered.extend(block.positions().iter().copied());
        }
    }

    #[test]
    fn test_impossible_covering() {
        let mut model = model(3, 3, 2);
        assert_eq!(
            cover(&mut model, true, &no_interrupt()),
            Err(CoverError::ImpossibleToFinish)
        );
    }

    #[test]
    fn test_backtracking_keeps_numbers_contiguous() {
        // without the finishability check the search walks into dead ends and
        // has to undo whole blocks
        let mut model = model(3, 3, 3);
        cover(&mut model, false, &no_interrupt()).unwrap();

        CoveringChecker::new(&model)
            .assert_filled()
            .assert_partition()
            .assert_block_sizes()
            .assert_connected();
        let numbers = model
            .blocks()
            .iter()
            .map(|block| block.number().get())
            .collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(model.block_at(RectPosition::new(2, 2)).is_some());
    }

    #[test]
    fn test_stop_is_reported() {
        let mut model = model(4, 4, 1);
        let token = CancelToken::new();
        token.cancel();

        assert_eq!(
            cover(&mut model, true, &Interrupt::new(token, None)),
            Err(CoverError::Stopped)
        );
    }
}
