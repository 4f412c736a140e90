//! Independent covering attempts from scratch.
//!
//! A single [`try_cover`](CoveringModel::try_cover) sometimes dead-ends because
//! its early random choices were unlucky, although a covering exists. Restarting
//! from the empty model with fresh random choices is usually cheaper than
//! backtracking out of such a branch.

use teselace_core::Topology;

use crate::{CoverError, CoverOptions, CoveringModel};

/// Default number of attempts of [`cover_with_retries`].
pub const COVERING_ATTEMPTS: usize = 100;

/// Statistics of a successful [`cover_with_retries`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverReport {
    /// The 1-based attempt that succeeded.
    pub attempt: usize,
    /// Earlier attempts that ended with [`CoverError::ImpossibleToFinish`].
    pub dead_ends: usize,
    /// Earlier attempts that ended with [`CoverError::Timeout`].
    pub timeouts: usize,
}

/// Covers `model`, retrying from scratch up to `attempts` times.
///
/// Dead ends and timeouts of single attempts only count as failed attempts.
/// A stop request ends the loop immediately.
///
/// # Errors
///
/// - [`CoverError::Stopped`] if the model's cancellation token was set.
/// - [`CoverError::AttemptsExhausted`] if no attempt succeeded.
///
/// # Examples
///
/// ```
/// use teselace_core::RectTopology;
/// use teselace_coverer::{
///     BlockSizes, CoverError, CoverOptions, CoveringConfig, CoveringModel, cover_with_retries,
/// };
///
/// let config = CoveringConfig::new(BlockSizes::fixed(2)?);
/// let mut model = CoveringModel::new(RectTopology::new(3, 3)?, config)?;
///
/// let result = cover_with_retries(&mut model, 3, &CoverOptions::default());
/// assert_eq!(result, Err(CoverError::AttemptsExhausted { attempts: 3 }));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn cover_with_retries<T: Topology>(
    model: &mut CoveringModel<T>,
    attempts: usize,
    options: &CoverOptions,
) -> Result<CoverReport, CoverError> {
    let mut dead_ends = 0;
    let mut timeouts = 0;

    for attempt in 1..=attempts {
        log::info!("covering attempt {attempt}/{attempts}");
        match model.try_cover_with(options) {
            Ok(()) => {
                log::info!("covering found in attempt {attempt}");
                return Ok(CoverReport {
                    attempt,
                    dead_ends,
                    timeouts,
                });
            }
            Err(CoverError::ImpossibleToFinish) => {
                log::info!("attempt {attempt} ran into a dead end");
                dead_ends += 1;
            }
            Err(CoverError::Timeout) => {
                log::info!("attempt {attempt} timed out");
                timeouts += 1;
            }
            Err(err) => return Err(err),
        }
    }

    log::warn!("no covering found in {attempts} attempts");
    Err(CoverError::AttemptsExhausted { attempts })
}
