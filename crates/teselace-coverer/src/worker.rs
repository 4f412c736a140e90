//! Background covering on a dedicated thread.

use std::{fmt, sync::mpsc, thread};

use teselace_core::Topology;

use crate::{CancelToken, CoverError, CoverOptions, CoverReport, CoveringModel, cover_with_retries};

/// Errors that can occur while waiting for a background covering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum WorkerError {
    /// The worker thread terminated without sending its result.
    #[display("covering worker disconnected")]
    Disconnected,
}

/// The model handed back by a finished background covering.
#[derive(Debug)]
pub struct CoverOutcome<T: Topology> {
    /// The model, fully covered on success and empty otherwise.
    pub model: CoveringModel<T>,
    /// Result of the retry loop.
    pub result: Result<CoverReport, CoverError>,
}

/// A handle for stopping and collecting a background covering.
pub struct CoverHandle<T: Topology> {
    cancel: CancelToken,
    receiver: mpsc::Receiver<CoverOutcome<T>>,
}

impl<T: Topology> fmt::Debug for CoverHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverHandle")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl<T: Topology> CoverHandle<T> {
    /// Asks the worker to stop; the outcome then reports [`CoverError::Stopped`].
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns the outcome if the worker has finished, without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Disconnected`] if the worker died without answering.
    pub fn poll(&mut self) -> Result<Option<CoverOutcome<T>>, WorkerError> {
        use mpsc::TryRecvError;

        match self.receiver.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }

    /// Blocks until the worker has finished.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Disconnected`] if the worker died without answering.
    pub fn join(self) -> Result<CoverOutcome<T>, WorkerError> {
        self.receiver.recv().map_err(|_| WorkerError::Disconnected)
    }
}

/// Moves `model` to a new thread and runs [`cover_with_retries`] there.
///
/// The model comes back through the returned handle once the loop ends, so only
/// one covering is ever in flight for it.
///
/// # Examples
///
/// ```
/// use teselace_core::RectTopology;
/// use teselace_coverer::{BlockSizes, CoverOptions, CoveringConfig, CoveringModel, spawn_cover};
///
/// let config = CoveringConfig::new(BlockSizes::fixed(3)?);
/// let model = CoveringModel::new(RectTopology::new(6, 6)?, config)?;
///
/// let handle = spawn_cover(model, 100, CoverOptions::default());
/// let outcome = handle.join()?;
/// assert!(outcome.result.is_ok());
/// assert!(outcome.model.is_filled());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn spawn_cover<T: Topology>(
    mut model: CoveringModel<T>,
    attempts: usize,
    options: CoverOptions,
) -> CoverHandle<T> {
    let cancel = model.cancel_token();
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let result = cover_with_retries(&mut model, attempts, &options);
        let _ = sender.send(CoverOutcome { model, result });
    });

    CoverHandle { cancel, receiver }
}
