use std::{ops::RangeInclusive, time::Duration};

use crate::{ConfigError, ConstraintKind};

/// The inclusive range of allowed block sizes.
///
/// When both bounds are equal the model runs in *fixed size* mode, which
/// tightens the finishability check from "large enough" to "divisible".
///
/// # Examples
///
/// ```
/// use teselace_coverer::BlockSizes;
///
/// let sizes = BlockSizes::new(3, 5)?;
/// assert!(!sizes.is_fixed());
/// assert!(sizes.contains(4));
///
/// assert!(BlockSizes::new(5, 3).is_err());
/// # Ok::<(), teselace_coverer::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSizes {
    min: usize,
    max: usize,
}

impl BlockSizes {
    /// Creates a validated size range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBlockSize`] if `min` is zero and
    /// [`ConfigError::InvalidBlockSizeRange`] if `max < min`.
    pub fn new(min: usize, max: usize) -> Result<Self, ConfigError> {
        if min == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if max < min {
            return Err(ConfigError::InvalidBlockSizeRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates a range admitting exactly one size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBlockSize`] if `size` is zero.
    pub fn fixed(size: usize) -> Result<Self, ConfigError> {
        Self::new(size, size)
    }

    /// Returns the smallest allowed block size.
    #[must_use]
    pub const fn min(self) -> usize {
        self.min
    }

    /// Returns the largest allowed block size.
    #[must_use]
    pub const fn max(self) -> usize {
        self.max
    }

    /// Returns `true` if only one block size is allowed.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        self.min == self.max
    }

    /// Returns `true` if `size` is an allowed block size.
    #[must_use]
    pub const fn contains(self, size: usize) -> bool {
        self.min <= size && size <= self.max
    }

    /// Returns all allowed sizes in increasing order.
    #[must_use]
    pub const fn iter(self) -> RangeInclusive<usize> {
        self.min..=self.max
    }

    /// Returns `true` if an empty region of `size` positions may still be covered.
    ///
    /// Fixed size mode requires divisibility; range mode only requires the region
    /// to fit the smallest block. The latter is a pruning heuristic, not a proof.
    #[must_use]
    pub const fn admits_region(self, size: usize) -> bool {
        if self.is_fixed() {
            size % self.min == 0
        } else {
            size >= self.min
        }
    }
}

impl Default for BlockSizes {
    fn default() -> Self {
        Self { min: 4, max: 4 }
    }
}

/// Block size bounds and active shape constraints of a model.
///
/// # Examples
///
/// ```
/// use teselace_coverer::{BlockSizes, ConstraintKind, CoveringConfig};
///
/// let config = CoveringConfig::new(BlockSizes::fixed(5)?)
///     .with_constraint(ConstraintKind::Planar)
///     .with_constraint(ConstraintKind::Planar);
///
/// assert_eq!(config.constraints(), &[ConstraintKind::Planar]);
/// assert!(config.validate(3).is_ok());
/// assert!(config.validate(2).is_err());
/// # Ok::<(), teselace_coverer::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoveringConfig {
    block_sizes: BlockSizes,
    constraints: Vec<ConstraintKind>,
}

impl CoveringConfig {
    /// Creates a configuration without constraints.
    #[must_use]
    pub fn new(block_sizes: BlockSizes) -> Self {
        Self {
            block_sizes,
            constraints: Vec::new(),
        }
    }

    /// Replaces the block size bounds.
    #[must_use]
    pub fn with_block_sizes(mut self, block_sizes: BlockSizes) -> Self {
        self.block_sizes = block_sizes;
        self
    }

    /// Activates a constraint. Activating it twice has no further effect.
    #[must_use]
    pub fn with_constraint(mut self, constraint: ConstraintKind) -> Self {
        if !self.constraints.contains(&constraint) {
            self.constraints.push(constraint);
        }
        self
    }

    /// Deactivates a constraint.
    #[must_use]
    pub fn without_constraint(mut self, constraint: ConstraintKind) -> Self {
        self.constraints.retain(|&active| active != constraint);
        self
    }

    /// Returns the block size bounds.
    #[must_use]
    pub fn block_sizes(&self) -> BlockSizes {
        self.block_sizes
    }

    /// Returns the active constraints in activation order.
    #[must_use]
    pub fn constraints(&self) -> &[ConstraintKind] {
        &self.constraints
    }

    /// Returns `true` if `constraint` is active.
    #[must_use]
    pub fn has_constraint(&self, constraint: ConstraintKind) -> bool {
        self.constraints.contains(&constraint)
    }

    /// Checks that every active constraint works in `dimensions` dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedConstraint`] for the first constraint
    /// that needs more dimensions.
    pub fn validate(&self, dimensions: usize) -> Result<(), ConfigError> {
        for &constraint in &self.constraints {
            if dimensions < constraint.min_dimensions() {
                return Err(ConfigError::UnsupportedConstraint {
                    constraint,
                    dimensions,
                });
            }
        }
        Ok(())
    }
}

/// Options for a single covering attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverOptions {
    /// Reject blocks that would leave an uncoverable empty region.
    pub check_finishable: bool,
    /// Abandon the attempt with [`CoverError::Timeout`](crate::CoverError::Timeout)
    /// after this long.
    pub timeout: Option<Duration>,
}

impl Default for CoverOptions {
    fn default() -> Self {
        Self {
            check_finishable: true,
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_sizes_validation() {
        assert_eq!(BlockSizes::new(0, 3), Err(ConfigError::ZeroBlockSize));
        assert_eq!(
            BlockSizes::new(4, 2),
            Err(ConfigError::InvalidBlockSizeRange { min: 4, max: 2 })
        );
        assert!(BlockSizes::new(2, 2).unwrap().is_fixed());
    }

    #[test]
    fn test_admits_region_fixed_mode() {
        let sizes = BlockSizes::fixed(3).unwrap();
        assert!(sizes.admits_region(0));
        assert!(sizes.admits_region(6));
        assert!(!sizes.admits_region(4));
    }

    #[test]
    fn test_admits_region_range_mode() {
        let sizes = BlockSizes::new(3, 4).unwrap();
        assert!(sizes.admits_region(3));
        // 5 cannot be split into 3s and 4s, but range mode only checks the minimum
        assert!(sizes.admits_region(5));
        assert!(!sizes.admits_region(2));
    }

    #[test]
    fn test_constraints_are_deduplicated_and_removable() {
        let config = CoveringConfig::default()
            .with_constraint(ConstraintKind::Path)
            .with_constraint(ConstraintKind::Path)
            .with_constraint(ConstraintKind::Planar);
        assert_eq!(
            config.constraints(),
            &[ConstraintKind::Path, ConstraintKind::Planar]
        );

        let config = config.without_constraint(ConstraintKind::Path);
        assert!(!config.has_constraint(ConstraintKind::Path));
        assert!(config.has_constraint(ConstraintKind::Planar));
    }

    #[test]
    fn test_planar_needs_three_dimensions() {
        let config = CoveringConfig::default().with_constraint(ConstraintKind::Planar);
        assert_eq!(
            config.validate(2),
            Err(ConfigError::UnsupportedConstraint {
                constraint: ConstraintKind::Planar,
                dimensions: 2,
            })
        );
        assert!(config.validate(3).is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = CoveringConfig::default();
        assert_eq!(config.block_sizes(), BlockSizes::fixed(4).unwrap());
        assert!(config.constraints().is_empty());

        let options = CoverOptions::default();
        assert!(options.check_finishable);
        assert_eq!(options.timeout, None);
    }
}
