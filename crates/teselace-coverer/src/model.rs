use rand_pcg::Pcg64;
use teselace_core::{AllPositions, Block, BlockNumber, CellState, Color, StateGrid, Topology};

use crate::{
    BlockSizes, CancelToken, ConfigError, ConstraintKind, CoverError, CoverOptions, CoveringConfig,
    CoveringSeed, block_search::BlockSearch, cancel::Interrupt, coverer,
};

/// A space to be covered, together with its current partial covering.
///
/// The model owns the state grid, the committed blocks and the random source
/// every search draws from. At any time the number of empty positions plus the
/// sizes of all blocks equals the number of positions of the topology.
///
/// Reconfiguring the model (topology, block sizes, constraints) always resets it
/// to the empty state.
///
/// # Examples
///
/// ```
/// use teselace_core::{RectPosition, RectTopology};
/// use teselace_coverer::{BlockSizes, CoveringConfig, CoveringModel, CoveringSeed};
///
/// let config = CoveringConfig::new(BlockSizes::fixed(4)?);
/// let mut model = CoveringModel::with_seed(
///     RectTopology::new(4, 4)?,
///     config,
///     CoveringSeed::from_phrase("example"),
/// )?;
///
/// model.try_cover()?;
/// assert!(model.is_filled());
/// assert_eq!(model.blocks().len(), 4);
///
/// let owner = model.block_at(RectPosition::new(3, 3)).unwrap();
/// assert_eq!(owner.size(), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CoveringModel<T: Topology> {
    config: CoveringConfig,
    grid: StateGrid<T>,
    blocks: Vec<Block<T::Position>>,
    empty_positions: usize,
    seed: CoveringSeed,
    rng: Pcg64,
    cancel: CancelToken,
}

impl<T: Topology> CoveringModel<T> {
    /// Creates an empty model with a random seed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedConstraint`] if the configuration
    /// activates a constraint the topology cannot support.
    pub fn new(topology: T, config: CoveringConfig) -> Result<Self, ConfigError> {
        Self::with_seed(topology, config, CoveringSeed::random())
    }

    /// Creates an empty model whose searches are reproducible from `seed`.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_seed(
        topology: T,
        config: CoveringConfig,
        seed: CoveringSeed,
    ) -> Result<Self, ConfigError> {
        config.validate(T::DIMENSIONS)?;
        let empty_positions = topology.total_positions();
        Ok(Self {
            config,
            grid: StateGrid::new(topology),
            blocks: Vec::new(),
            empty_positions,
            seed,
            rng: seed.rng(),
            cancel: CancelToken::new(),
        })
    }

    /// Returns the seed the random source was last initialized with.
    #[must_use]
    pub fn seed(&self) -> CoveringSeed {
        self.seed
    }

    /// Restarts the random source from `seed`.
    ///
    /// The current covering is kept.
    pub fn reseed(&mut self, seed: CoveringSeed) {
        self.seed = seed;
        self.rng = seed.rng();
    }

    /// Removes every block, leaving all positions empty.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.blocks.clear();
        self.empty_positions = self.grid.topology().total_positions();
    }

    /// Replaces the whole configuration and resets the model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedConstraint`] if the configuration does
    /// not fit the topology. The model is left unchanged in that case.
    pub fn set_config(&mut self, config: CoveringConfig) -> Result<(), ConfigError> {
        config.validate(T::DIMENSIONS)?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Replaces the topology and resets the model.
    pub fn set_topology(&mut self, topology: T) {
        self.grid.reset_with(topology);
        self.reset();
    }

    /// Changes the block size bounds and resets the model.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are not a valid [`BlockSizes`] range. The
    /// model is left unchanged in that case.
    pub fn set_block_size(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
        let sizes = BlockSizes::new(min, max)?;
        self.set_config(self.config.clone().with_block_sizes(sizes))
    }

    /// Activates a constraint and resets the model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedConstraint`] if the topology has too
    /// few dimensions for `constraint`.
    pub fn add_constraint(&mut self, constraint: ConstraintKind) -> Result<(), ConfigError> {
        self.set_config(self.config.clone().with_constraint(constraint))
    }

    /// Deactivates a constraint and resets the model.
    pub fn remove_constraint(&mut self, constraint: ConstraintKind) {
        self.config = self.config.clone().without_constraint(constraint);
        self.reset();
    }

    /// Returns the topology.
    #[must_use]
    pub fn topology(&self) -> &T {
        self.grid.topology()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CoveringConfig {
        &self.config
    }

    /// Returns the number of positions of the topology.
    #[must_use]
    pub fn total_positions(&self) -> usize {
        self.grid.topology().total_positions()
    }

    /// Returns all positions in canonical order.
    #[must_use]
    pub fn all_positions(&self) -> AllPositions<'_, T> {
        self.grid.topology().all_positions()
    }

    /// Returns the state of `pos`.
    #[must_use]
    pub fn cell(&self, pos: T::Position) -> CellState {
        self.grid[pos]
    }

    /// Returns the state grid.
    #[must_use]
    pub fn grid(&self) -> &StateGrid<T> {
        &self.grid
    }

    /// Returns the committed blocks in commit order.
    #[must_use]
    pub fn blocks(&self) -> &[Block<T::Position>] {
        &self.blocks
    }

    /// Returns the block with the given number.
    #[must_use]
    pub fn block(&self, number: BlockNumber) -> Option<&Block<T::Position>> {
        self.blocks.get(number.get() - 1)
    }

    /// Returns the block with the given number for changing its cosmetic state.
    #[must_use]
    pub fn block_mut(&mut self, number: BlockNumber) -> Option<&mut Block<T::Position>> {
        self.blocks.get_mut(number.get() - 1)
    }

    /// Returns the block covering `pos`, if any.
    #[must_use]
    pub fn block_at(&self, pos: T::Position) -> Option<&Block<T::Position>> {
        self.grid[pos]
            .block_number()
            .and_then(|number| self.block(number))
    }

    /// Returns `true` if every position is covered.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.empty_positions == 0
    }

    /// Returns the number of positions not covered by any block.
    #[must_use]
    pub fn empty_positions(&self) -> usize {
        self.empty_positions
    }

    /// Returns the first empty position at or after `from` in canonical order.
    #[must_use]
    pub fn next_empty(&self, from: T::Position) -> Option<T::Position> {
        let topology = self.grid.topology();
        std::iter::successors(Some(from), |&pos| topology.next_position(pos))
            .find(|&pos| self.grid[pos].is_empty())
    }

    /// Commits a block over empty positions and returns its number.
    pub(crate) fn add_block(&mut self, positions: Vec<T::Position>) -> BlockNumber {
        let number = BlockNumber::new(self.blocks.len() + 1);
        for &pos in &positions {
            debug_assert!(self.grid[pos].is_empty(), "{pos} is already covered");
            self.grid.set(pos, CellState::Block(number));
        }
        self.empty_positions -= positions.len();
        let color = Color::random(&mut self.rng);
        self.blocks.push(Block::new(number, positions, color));
        number
    }

    /// Removes the most recently committed block.
    pub(crate) fn pop_block(&mut self) -> Option<Block<T::Position>> {
        let block = self.blocks.pop()?;
        for &pos in block.positions() {
            self.grid.set(pos, CellState::Empty);
        }
        self.empty_positions += block.size();
        Some(block)
    }

    /// Searches for one block containing `start` without committing it.
    ///
    /// The positions are returned in the order the block grew. The search
    /// observes the model's cancellation token.
    ///
    /// # Errors
    ///
    /// Returns [`CoverError::ImpossibleToFinish`] if no allowed block exists at
    /// `start`, or [`CoverError::Stopped`] if the search was cancelled.
    pub fn random_block(
        &mut self,
        start: T::Position,
        check_finishable: bool,
    ) -> Result<Vec<T::Position>, CoverError> {
        let interrupt = Interrupt::new(self.cancel.clone(), None);
        self.search_block(start, check_finishable, &interrupt)
    }

    pub(crate) fn search_block(
        &mut self,
        start: T::Position,
        check_finishable: bool,
        interrupt: &Interrupt,
    ) -> Result<Vec<T::Position>, CoverError> {
        BlockSearch {
            grid: &self.grid,
            sizes: self.config.block_sizes(),
            constraints: self.config.constraints(),
            check_finishable,
            interrupt,
            rng: &mut self.rng,
        }
        .random_block(start)
    }

    /// Returns a handle that stops running and future searches of this model.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Requests the running covering to stop.
    ///
    /// The request stays in effect until [`resume`](Self::resume) is called.
    pub fn stop_covering(&self) {
        self.cancel.cancel();
    }

    /// Withdraws a stop request, allowing new searches to run.
    pub fn resume(&self) {
        self.cancel.clear();
    }

    /// Covers the model with default [`CoverOptions`].
    ///
    /// # Errors
    ///
    /// See [`try_cover_with`](Self::try_cover_with).
    pub fn try_cover(&mut self) -> Result<(), CoverError> {
        self.try_cover_with(&CoverOptions::default())
    }

    /// Covers the model from scratch.
    ///
    /// Either the model ends up fully covered, or it is reset to the empty state
    /// and the reason is returned.
    ///
    /// # Errors
    ///
    /// - [`CoverError::ImpossibleToFinish`] if the search ran out of blocks.
    /// - [`CoverError::Stopped`] if the cancellation token was set.
    /// - [`CoverError::Timeout`] if `options.timeout` elapsed.
    pub fn try_cover_with(&mut self, options: &CoverOptions) -> Result<(), CoverError> {
        self.reset();
        let interrupt = Interrupt::new(self.cancel.clone(), options.timeout);
        let result = coverer::cover(self, options.check_finishable, &interrupt);
        if let Err(err) = result {
            log::debug!("covering attempt failed: {err}");
            self.reset();
        }
        result
    }
}
