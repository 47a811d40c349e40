use crate::{
    config::FetchConfig,
    download::{DownloadCoordinator, DownloadReport},
    error::GoesFetchError,
    local::{DiskStore, LocalStore},
    object::SearchResultSet,
    pending::Pending,
    progress::{NoProgress, ProgressObserver},
    remote::RemoteArchive,
    request::SearchRequest,
    search::SearchCoordinator,
};
use std::{path::PathBuf, sync::Arc};

/// A local mirror of a remote GOES archive.
///
/// `search` and `download_all` each run on their own coordinator thread and return a
/// [`Pending`] handle right away. Every call has its own completion tracking, so several may
/// run at once against the same `Archive`.
pub struct Archive<RA: RemoteArchive, LS: LocalStore = DiskStore> {
    remote: RA,
    local: LS,
    config: FetchConfig,
    observer: Arc<dyn ProgressObserver>,
}

impl<RA: RemoteArchive> Archive<RA, DiskStore> {
    pub fn connect<P>(root_path: P, remote: RA) -> Self
    where
        P: Into<PathBuf>,
    {
        let config = FetchConfig::default().with_output_root(root_path);
        log::info!("Connected to archive at: {:?}", &config.output_root);

        Self {
            remote,
            local: DiskStore,
            config,
            observer: Arc::new(NoProgress),
        }
    }
}

impl<RA: RemoteArchive, LS: LocalStore> Archive<RA, LS> {
    pub fn with_config(mut self, config: FetchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: ProgressObserver + 'static,
    {
        self.observer = Arc::new(observer);
        self
    }

    pub fn with_local_store<L: LocalStore>(self, local: L) -> Archive<RA, L> {
        Archive {
            remote: self.remote,
            local,
            config: self.config,
            observer: self.observer,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Find every object matching `request` whose scan start lies strictly inside its window.
    pub fn search(&self, request: SearchRequest) -> Pending<SearchResultSet> {
        let coordinator =
            SearchCoordinator::new(self.remote.clone(), &self.config, Arc::clone(&self.observer));

        Pending::spawn("Search Coordinator", move || coordinator.search(&request))
    }

    /// Bring every object in `results` onto local disk, skipping files already there.
    ///
    /// The report always has one outcome per object; individual failures are recorded there
    /// rather than failing the batch.
    pub fn download_all(&self, results: SearchResultSet) -> Pending<DownloadReport> {
        if results.is_empty() {
            return Pending::ready("Download Coordinator", Ok(DownloadReport::default()));
        }

        let coordinator = DownloadCoordinator::new(
            self.remote.clone(),
            self.local.clone(),
            &self.config,
            Arc::clone(&self.observer),
        );

        Pending::spawn("Download Coordinator", move || {
            Ok(coordinator.download_all(results))
        })
    }

    /// Search, download, and return the local paths of every matching file now on disk.
    ///
    /// Fails if the search fails or if any file could not be retrieved.
    pub fn retrieve_paths(&self, request: SearchRequest) -> Result<Vec<PathBuf>, GoesFetchError> {
        let results = self.search(request).wait()?;
        let report = self.download_all(results).wait()?;

        if let Some((key, reason)) = report.failures().next() {
            return Err(GoesFetchError::Transfer(format!(
                "{} of {} files failed, first was {}: {}",
                report.num_failed(),
                report.len(),
                key,
                reason
            )));
        }

        Ok(report.local_paths())
    }
}
