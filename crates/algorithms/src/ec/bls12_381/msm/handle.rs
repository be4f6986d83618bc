//! Completion handle for a multi-exponentiation running on the worker pool.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

use tracing::warn;

use crate::error::{Error, Result};

/// A single-use handle to an MSM result.
///
/// The computation owns the sending side; if it goes away without sending,
/// joining reports `Error::Processing`.
#[derive(Debug)]
pub struct MsmHandle<G> {
    rx: Receiver<Result<G>>,
}

impl<G> MsmHandle<G> {
    /// A handle plus the sender the worker completes it with.
    pub(crate) fn channel() -> (Sender<Result<G>>, Self) {
        let (tx, rx) = bounded(1);
        (tx, MsmHandle { rx })
    }

    /// A handle that is already complete.
    pub(crate) fn ready(value: Result<G>) -> Self {
        let (tx, handle) = Self::channel();
        // The receiver is alive and the slot is empty
        let _ = tx.send(value);
        handle
    }

    /// Block until the result is available.
    pub fn join(self) -> Result<G> {
        match self.rx.recv() {
            Ok(res) => res,
            Err(_) => Err(disconnected()),
        }
    }

    /// Return the result if it is ready, or the handle back if not.
    pub fn try_join(self) -> core::result::Result<Result<G>, Self> {
        match self.rx.try_recv() {
            Ok(res) => Ok(res),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) => Ok(Err(disconnected())),
        }
    }
}

fn disconnected() -> Error {
    warn!("msm worker dropped its result channel");
    Error::Processing {
        operation: "MsmHandle::join",
        details: "worker exited without a result",
    }
}
