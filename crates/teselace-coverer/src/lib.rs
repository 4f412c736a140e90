//! Randomized backtracking search that covers a topology with blocks.
//!
//! A covering partitions every position of a [`Topology`](teselace_core::Topology)
//! into connected blocks whose sizes lie within configured bounds, optionally
//! subject to shape constraints.
//!
//! # Overview
//!
//! - [`CoveringModel`]: The space, its partial covering and the random source
//!   driving every search
//! - [`constraint`]: Path and planar shape rules checked while a block grows
//! - [`finishable`]: Pruning of states whose empty regions can no longer be covered
//! - [`cover_with_retries`]: Independent attempts from scratch
//! - [`spawn_cover`]: The same loop on a background thread, cancellable through
//!   a [`CancelToken`]
//!
//! # Search
//!
//! The coverer repeatedly picks the first empty position in canonical order and
//! grows a random block from it by depth-first search over empty neighbors. If no
//! block can be grown there, it removes the previously placed block and tries a
//! different block at that block's start position. A start position is given up
//! once [`BLOCK_ATTEMPTS`] draws in a row only produce blocks already known to
//! lead into dead ends.
//!
//! # Examples
//!
//! ```
//! use teselace_core::PyramidTopology;
//! use teselace_coverer::{
//!     BlockSizes, COVERING_ATTEMPTS, ConstraintKind, CoverOptions, CoveringConfig,
//!     CoveringModel, CoveringSeed, cover_with_retries,
//! };
//!
//! let config = CoveringConfig::new(BlockSizes::fixed(5)?).with_constraint(ConstraintKind::Planar);
//! let mut model = CoveringModel::with_seed(
//!     PyramidTopology::new(4)?,
//!     config,
//!     CoveringSeed::from_phrase("pyramid"),
//! )?;
//!
//! cover_with_retries(&mut model, COVERING_ATTEMPTS, &CoverOptions::default())?;
//! assert!(model.is_filled());
//! assert_eq!(model.blocks().len(), 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    cancel::CancelToken,
    config::{BlockSizes, CoverOptions, CoveringConfig},
    constraint::{ConstraintKind, ConstraintWatcher, Watcher},
    coverer::BLOCK_ATTEMPTS,
    error::{ConfigError, CoverError},
    model::CoveringModel,
    retry::{COVERING_ATTEMPTS, CoverReport, cover_with_retries},
    seed::{CoveringSeed, ParseSeedError},
    worker::{CoverHandle, CoverOutcome, WorkerError, spawn_cover},
};

pub mod constraint;
pub mod finishable;

mod block_search;
mod cancel;
mod config;
mod coverer;
mod error;
mod model;
mod retry;
mod seed;
mod worker;

#[cfg(test)]
mod testing;
