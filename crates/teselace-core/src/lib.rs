//! Core data structures for covering discrete spaces with blocks.
//!
//! This crate provides the spatial vocabulary shared by the covering engine and
//! its consumers. It knows nothing about searching; it only describes *where*
//! blocks can live and *what* each position currently holds.
//!
//! # Overview
//!
//! 1. **Topologies** - Finite spaces with a canonical enumeration order and an
//!    adjacency relation
//!    - [`topology`]: The [`Topology`] trait implemented by every space
//!    - [`rectangle`]: A `width × height` grid with 4-connectivity
//!    - [`pyramid`]: A tetrahedral stack of triangular layers with 12-connectivity
//!
//! 2. **State** - What each position holds
//!    - [`grid`]: [`StateGrid`], a flat, cheaply clonable map from positions to
//!      [`CellState`]
//!    - [`block`]: Committed [`Block`]s and their [`BlockNumber`]s
//!    - [`color`]: Cosmetic block [`Color`]s
//!
//! # Examples
//!
//! ```
//! use teselace_core::{CellState, RectPosition, RectTopology, StateGrid, Topology as _};
//!
//! let topology = RectTopology::new(3, 2)?;
//! assert_eq!(topology.total_positions(), 6);
//!
//! let mut grid = StateGrid::new(topology);
//! grid.set(RectPosition::new(1, 1), CellState::Placeholder);
//! assert!(grid[RectPosition::new(1, 1)].is_placeholder());
//! assert!(grid[RectPosition::new(0, 0)].is_empty());
//! # Ok::<(), teselace_core::TopologyError>(())
//! ```

pub mod block;
pub mod color;
pub mod grid;
pub mod pyramid;
pub mod rectangle;
pub mod topology;

mod error;

pub use self::{
    block::{Block, BlockNumber},
    color::Color,
    error::TopologyError,
    grid::{CellState, StateGrid},
    pyramid::{PyramidPosition, PyramidTopology},
    rectangle::{RectPosition, RectTopology},
    topology::{AllPositions, Topology},
};
