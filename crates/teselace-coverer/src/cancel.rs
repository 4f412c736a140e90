//! Cooperative cancellation of a running search.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crate::CoverError;

/// A cloneable stop flag shared between a covering model and its controllers.
///
/// Setting the flag is the only state another thread may touch while a search
/// is running. The search polls it before pulling each candidate position, so a
/// stop request takes effect promptly. The flag stays set until [`clear`](Self::clear)ed.
///
/// # Examples
///
/// ```
/// use teselace_coverer::CancelToken;
///
/// let token = CancelToken::new();
/// let remote = token.clone();
///
/// remote.cancel();
/// assert!(token.is_cancelled());
///
/// token.clear();
/// assert!(!remote.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    stopped: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests every search observing this token to stop.
    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Withdraws a previous stop request.
    pub fn clear(&self) {
        self.stopped.store(false, Ordering::Release);
    }

    /// Returns `true` if a stop was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// The cancellation sources polled by one covering attempt.
#[derive(Debug, Clone)]
pub(crate) struct Interrupt {
    token: CancelToken,
    deadline: Option<Instant>,
}

impl Interrupt {
    pub(crate) fn new(token: CancelToken, timeout: Option<Duration>) -> Self {
        // a deadline beyond the representable range never expires
        let deadline = timeout.and_then(|timeout| Instant::now().checked_add(timeout));
        Self { token, deadline }
    }

    /// Fails with the matching cancellation outcome if the attempt must stop.
    pub(crate) fn check(&self) -> Result<(), CoverError> {
        if self.token.is_cancelled() {
            return Err(CoverError::Stopped);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(CoverError::Timeout);
        }
        Ok(())
    }
}
