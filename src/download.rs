use crate::{
    config::FetchConfig,
    error::{GoesFetchError, RemoteError},
    local::LocalStore,
    object::{ObjectDescriptor, SearchResultSet},
    progress::ProgressObserver,
    remote::RemoteArchive,
};
use crossbeam_channel::unbounded;
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

/// What happened to one object of a download batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded(PathBuf),
    /// The file was already on disk and was not fetched again.
    Skipped(PathBuf),
    Failed { key: String, reason: String },
}

impl DownloadOutcome {
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            DownloadOutcome::Downloaded(pth) | DownloadOutcome::Skipped(pth) => Some(pth),
            DownloadOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DownloadOutcome::Failed { .. })
    }
}

/// One outcome per input object, in the order they resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DownloadReport {
    outcomes: Vec<DownloadOutcome>,
}

impl DownloadReport {
    pub fn outcomes(&self) -> &[DownloadOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<DownloadOutcome> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn num_downloaded(&self) -> usize {
        self.count(|o| matches!(o, DownloadOutcome::Downloaded(_)))
    }

    pub fn num_skipped(&self) -> usize {
        self.count(|o| matches!(o, DownloadOutcome::Skipped(_)))
    }

    pub fn num_failed(&self) -> usize {
        self.count(DownloadOutcome::is_failed)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            DownloadOutcome::Failed { key, reason } => Some((key.as_str(), reason.as_str())),
            _ => None,
        })
    }

    /// Paths of every file now on disk, downloaded or skipped.
    pub fn local_paths(&self) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|o| o.local_path().map(Path::to_path_buf))
            .collect()
    }

    fn count<F: Fn(&DownloadOutcome) -> bool>(&self, pred: F) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Where `key` from `bucket` is stored locally: `<root>/<bucket>/<key>`.
///
/// Keys with empty, `.` or `..` segments are refused.
pub fn local_path_for(root: &Path, bucket: &str, key: &str) -> Result<PathBuf, GoesFetchError> {
    let mut pth = root.to_path_buf();

    for segment in std::iter::once(bucket).chain(key.split('/')) {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(GoesFetchError::UnsafeKey(format!("{}/{}", bucket, key)));
        }
        pth.push(segment);
    }

    Ok(pth)
}

/// Mirrors a search result set onto the local disk.
pub struct DownloadCoordinator<RA: RemoteArchive, LS: LocalStore> {
    remote: RA,
    local: LS,
    root: PathBuf,
    max_retries: u32,
    num_downloaders: usize,
    observer: Arc<dyn ProgressObserver>,
}

impl<RA: RemoteArchive, LS: LocalStore> DownloadCoordinator<RA, LS> {
    pub fn new(
        remote: RA,
        local: LS,
        config: &FetchConfig,
        observer: Arc<dyn ProgressObserver>,
    ) -> Self {
        Self {
            remote,
            local,
            root: config.output_root.clone(),
            max_retries: config.max_retries,
            num_downloaders: config.concurrency.max(1),
            observer,
        }
    }

    /// Resolve every object in `results`, blocking until all of them have an outcome.
    ///
    /// A failed object never stops the others; its failure shows up in the report.
    pub fn download_all(&self, results: SearchResultSet) -> DownloadReport {
        let total = results.len();
        if total == 0 {
            return DownloadReport::default();
        }

        log::info!(
            "Downloading {} objects ({} bytes) from {}",
            total,
            results.total_size(),
            results.bucket()
        );

        let bucket = results.bucket().to_owned();
        let (to_coordinator, resolved) = unbounded::<(usize, DownloadOutcome)>();
        let pool = threadpool::ThreadPool::with_name(
            "Download Thread".to_owned(),
            self.num_downloaders.min(total),
        );

        let mut keys: Vec<String> = Vec::with_capacity(total);
        for (idx, obj) in results.into_iter().enumerate() {
            keys.push(obj.key.clone());

            let item = ItemDownload {
                remote: self.remote.clone(),
                local: self.local.clone(),
                root: self.root.clone(),
                bucket: bucket.clone(),
                max_retries: self.max_retries,
            };
            let to_coordinator = to_coordinator.clone();

            pool.execute(move || {
                let outcome = item.resolve(&obj);
                let _ = to_coordinator.send((idx, outcome));
            });
        }

        drop(to_coordinator);

        let mut reported = vec![false; total];
        let mut outcomes: Vec<DownloadOutcome> = Vec::with_capacity(total);

        for (idx, outcome) in resolved.iter() {
            if std::mem::replace(&mut reported[idx], true) {
                continue;
            }

            self.observer.download_resolved(outcomes.len() + 1, total, &outcome);
            outcomes.push(outcome);

            if outcomes.len() == total {
                break;
            }
        }

        // Only reachable if a worker died mid-item.
        for (key, _) in keys
            .into_iter()
            .zip(reported.iter())
            .filter(|(_, reported)| !**reported)
        {
            log::error!("Download worker exited without reporting on {}", key);
            let outcome = DownloadOutcome::Failed {
                key,
                reason: "download worker exited unexpectedly".into(),
            };
            self.observer.download_resolved(outcomes.len() + 1, total, &outcome);
            outcomes.push(outcome);
        }

        let report = DownloadReport { outcomes };
        log::info!(
            "Download finished: {} downloaded, {} skipped, {} failed",
            report.num_downloaded(),
            report.num_skipped(),
            report.num_failed()
        );

        report
    }
}

struct ItemDownload<RA, LS> {
    remote: RA,
    local: LS,
    root: PathBuf,
    bucket: String,
    max_retries: u32,
}

impl<RA: RemoteArchive, LS: LocalStore> ItemDownload<RA, LS> {
    fn resolve(&self, obj: &ObjectDescriptor) -> DownloadOutcome {
        let failed = |reason: String| DownloadOutcome::Failed {
            key: obj.key.clone(),
            reason,
        };

        let local_path = match local_path_for(&self.root, &self.bucket, &obj.key) {
            Ok(pth) => pth,
            Err(err) => return failed(err.to_string()),
        };

        if let Some(dir) = local_path.parent() {
            if let Err(err) = self.local.create_dir_all(dir) {
                log::error!("Error creating directory: {:?} : {}", dir, err);
                return failed(format!("unable to create {:?}: {}", dir, err));
            }
        }

        if self.local.exists(&local_path) {
            log::debug!("Skipping download for {:?}", local_path);
            return DownloadOutcome::Skipped(local_path);
        }

        let part_path = part_path(&local_path);
        let attempts = self.max_retries + 1;
        let mut last_err = String::new();

        for attempt in 1..=attempts {
            match self.transfer(obj, &part_path, &local_path) {
                Ok(()) => {
                    log::debug!("Saved {:?}", local_path);
                    return DownloadOutcome::Downloaded(local_path);
                }
                Err(err) => {
                    if self.local.exists(&part_path) {
                        if let Err(err) = self.local.remove_file(&part_path) {
                            log::warn!("Error removing partial file: {:?} : {}", part_path, err);
                        }
                    }
                    log::warn!(
                        "Attempt {}/{} downloading {} failed: {}",
                        attempt,
                        attempts,
                        obj.key,
                        err
                    );
                    last_err = err.to_string();
                }
            }
        }

        log::error!("Error downloading data: {} : {}", obj.key, last_err);
        failed(format!("gave up after {} attempts: {}", attempts, last_err))
    }

    fn transfer(
        &self,
        obj: &ObjectDescriptor,
        part_path: &Path,
        local_path: &Path,
    ) -> Result<(), RemoteError> {
        let mut sink = CountingWriter::new(self.local.create(part_path)?);

        self.remote.fetch_object(&self.bucket, &obj.key, &mut sink)?;
        sink.flush()?;

        let received = sink.count;
        drop(sink);

        if received != obj.size {
            return Err(Box::new(GoesFetchError::Transfer(format!(
                "expected {} bytes, received {}",
                obj.size, received
            ))));
        }

        self.local.rename(part_path, local_path)?;

        Ok(())
    }
}

fn part_path(local_path: &Path) -> PathBuf {
    let mut fname = local_path
        .file_name()
        .map(|f| f.to_os_string())
        .unwrap_or_default();
    fname.push(".part");
    local_path.with_file_name(fname)
}

struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
