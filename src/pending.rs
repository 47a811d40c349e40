use crate::error::GoesFetchError;
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use std::thread;

/// A search or download batch running on its own coordinator thread.
///
/// The coordinator delivers exactly one result. Nothing cancels it once started; dropping the
/// handle only discards the result.
#[derive(Debug)]
pub struct Pending<T> {
    name: &'static str,
    result: Receiver<Result<T, GoesFetchError>>,
}

impl<T: Send + 'static> Pending<T> {
    pub(crate) fn spawn<F>(name: &'static str, job: F) -> Self
    where
        F: FnOnce() -> Result<T, GoesFetchError> + Send + 'static,
    {
        let (to_handle, result) = bounded(1);

        let spawned = thread::Builder::new().name(name.into()).spawn(move || {
            // The caller may have dropped the handle.
            let _ = to_handle.send(job());
        });

        match spawned {
            Ok(_) => Self { name, result },
            Err(err) => {
                log::error!("Unable to start {}: {}", name, err);
                Self::ready(name, Err(GoesFetchError::Io(err)))
            }
        }
    }

    pub(crate) fn ready(name: &'static str, value: Result<T, GoesFetchError>) -> Self {
        let (to_handle, result) = bounded(1);
        let _ = to_handle.send(value);
        Self { name, result }
    }

    /// Block until the coordinator finishes.
    pub fn wait(self) -> Result<T, GoesFetchError> {
        let name = self.name;
        self.result.recv().unwrap_or_else(|_| Err(Self::lost(name)))
    }

    /// Take the result if it is available, otherwise hand the handle back.
    pub fn try_wait(self) -> Result<Result<T, GoesFetchError>, Self> {
        match self.result.try_recv() {
            Ok(value) => Ok(value),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) => Ok(Err(Self::lost(self.name))),
        }
    }

    fn lost(name: &'static str) -> GoesFetchError {
        GoesFetchError::Coordinator(format!("{} exited without a result", name))
    }
}
