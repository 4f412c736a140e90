//! Test utilities for checking finished coverings.
//!
//! [`CoveringChecker`] wraps a model and offers chainable assertions about
//! the shape of its covering:
//!
//! ```ignore
//! CoveringChecker::new(&model)
//!     .assert_filled()
//!     .assert_partition()
//!     .assert_block_sizes()
//!     .assert_connected();
//! ```

use std::collections::{BTreeMap, BTreeSet};

use teselace_core::{Block, CellState, Topology};

use crate::{
    CoveringModel,
    constraint::{Plane, Vector3},
};

/// A chainable set of assertions over a model's covering.
///
/// # Panics
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the calling test.
#[derive(Debug)]
pub struct CoveringChecker<'a, T: Topology> {
    model: &'a CoveringModel<T>,
}

impl<'a, T: Topology> CoveringChecker<'a, T> {
    pub fn new(model: &'a CoveringModel<T>) -> Self {
        Self { model }
    }

    /// Asserts that no position is left empty.
    #[track_caller]
    pub fn assert_filled(self) -> Self {
        assert!(self.model.is_filled(), "{} positions left empty", self.model.empty_positions());
        for pos in self.model.all_positions() {
            let cell = self.model.cell(pos);
            assert!(
                matches!(cell, CellState::Block(_)),
                "{pos} is {cell:?} in a filled model"
            );
        }
        self
    }

    /// Asserts that every covered position belongs to exactly one block and
    /// that the grid agrees with the block list.
    #[track_caller]
    pub fn assert_partition(self) -> Self {
        let mut owners = BTreeMap::new();
        for block in self.model.blocks() {
            for &pos in block.positions() {
                if let Some(other) = owners.insert(pos, block.number()) {
                    panic!("{pos} belongs to blocks {other} and {}", block.number());
                }
                assert_eq!(
                    self.model.cell(pos),
                    CellState::Block(block.number()),
                    "grid disagrees with block {} at {pos}",
                    block.number()
                );
            }
        }

        let covered = self.model.blocks().iter().map(Block::size).sum::<usize>();
        assert_eq!(
            covered + self.model.empty_positions(),
            self.model.total_positions(),
            "block sizes and empty positions do not add up"
        );
        for (i, block) in self.model.blocks().iter().enumerate() {
            assert_eq!(block.number().get(), i + 1, "block numbers are not contiguous");
        }
        self
    }

    /// Asserts that every block size is within the configured bounds.
    #[track_caller]
    pub fn assert_block_sizes(self) -> Self {
        let sizes = self.model.config().block_sizes();
        for block in self.model.blocks() {
            assert!(
                sizes.contains(block.size()),
                "block {} has size {}, expected {}..={}",
                block.number(),
                block.size(),
                sizes.min(),
                sizes.max()
            );
        }
        self
    }

    /// Asserts that every block is connected under the topology's adjacency.
    #[track_caller]
    pub fn assert_connected(self) -> Self {
        for block in self.model.blocks() {
            let members = block.positions().iter().copied().collect::<BTreeSet<_>>();
            let first = block.positions()[0];
            let mut reached = BTreeSet::from([first]);
            let mut stack = vec![first];
            while let Some(pos) = stack.pop() {
                for neighbor in self.model.topology().neighbors(pos) {
                    if members.contains(&neighbor) && reached.insert(neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
            assert_eq!(
                reached.len(),
                members.len(),
                "block {} is not connected",
                block.number()
            );
        }
        self
    }

    /// Asserts that every block forms a simple path.
    ///
    /// Inside a block, the two ends have exactly one neighbor and every other
    /// position has exactly two.
    #[track_caller]
    pub fn assert_paths(self) -> Self {
        let this = self.assert_connected();
        for block in this.model.blocks() {
            if block.size() == 1 {
                continue;
            }
            let mut degrees = block
                .positions()
                .iter()
                .map(|&pos| {
                    this.model
                        .topology()
                        .neighbors(pos)
                        .filter(|neighbor| block.contains(neighbor))
                        .count()
                })
                .collect::<Vec<_>>();
            degrees.sort_unstable();

            let mut expected = vec![2; block.size()];
            expected[0] = 1;
            expected[1] = 1;
            assert_eq!(degrees, expected, "block {} is not a simple path", block.number());
        }
        this
    }

    /// Asserts that the positions of every block lie in one plane.
    #[track_caller]
    pub fn assert_planar(self) -> Self {
        for block in self.model.blocks() {
            let points = block
                .positions()
                .iter()
                .map(|&pos| Vector3::from(self.model.topology().coordinates(pos)))
                .collect::<Vec<_>>();
            let plane = points.iter().enumerate().find_map(|(i, &p1)| {
                points[i + 1..].iter().enumerate().find_map(|(j, &p2)| {
                    points[i + j + 2..]
                        .iter()
                        .find_map(|&p3| Plane::through(p1, p2, p3))
                })
            });
            // collinear blocks lie in every plane through their line
            if let Some(plane) = plane {
                assert!(
                    points.iter().all(|&point| plane.contains(point)),
                    "block {} is not planar",
                    block.number()
                );
            }
        }
        self
    }

    /// Asserts the number of committed blocks.
    #[track_caller]
    pub fn assert_block_count(self, expected: usize) -> Self {
        assert_eq!(self.model.blocks().len(), expected, "unexpected number of blocks");
        self
    }
}
