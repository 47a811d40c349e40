//! Optional progress notifications.
//!
//! Observers are told about work after it has been counted, so they never influence when a
//! search or download batch completes.

use crate::download::DownloadOutcome;

pub trait ProgressObserver: Send + Sync {
    /// A listing query finished; `done` of `total` have now finished.
    fn query_completed(&self, _done: usize, _total: usize) {}

    /// One download resolved; `done` of `total` have now resolved.
    fn download_resolved(&self, _done: usize, _total: usize, _outcome: &DownloadOutcome) {}
}

/// Ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Reports progress through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn query_completed(&self, done: usize, total: usize) {
        log::info!("Listing queries: {}/{}", done, total);
    }

    fn download_resolved(&self, done: usize, total: usize, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded(pth) => log::info!("[{}/{}] Saved {:?}", done, total, pth),
            DownloadOutcome::Skipped(pth) => {
                log::info!("[{}/{}] File exists, skipped {:?}", done, total, pth)
            }
            DownloadOutcome::Failed { key, reason } => {
                log::error!("[{}/{}] Failed {}: {}", done, total, key, reason)
            }
        }
    }
}
