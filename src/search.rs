use crate::{
    config::FetchConfig,
    error::{GoesFetchError, RemoteError},
    object::{ObjectDescriptor, SearchResultSet},
    plan::{plan, ListingQuery},
    progress::ProgressObserver,
    remote::RemoteArchive,
    request::SearchRequest,
};
use crossbeam_channel::unbounded;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Runs every listing query for a request and gathers the matching objects.
pub struct SearchCoordinator<RA: RemoteArchive> {
    remote: RA,
    max_keys: usize,
    observer: Arc<dyn ProgressObserver>,
}

type QueryResult = Result<Vec<ObjectDescriptor>, GoesFetchError>;

impl<RA: RemoteArchive> SearchCoordinator<RA> {
    pub fn new(remote: RA, config: &FetchConfig, observer: Arc<dyn ProgressObserver>) -> Self {
        Self {
            remote,
            max_keys: config.max_keys,
            observer,
        }
    }

    /// Run the search to completion on the calling thread.
    ///
    /// The result set is returned once every planned query has answered. The first failing
    /// query (including one that lists a key without a start time) fails the whole search and
    /// no partial results are returned.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResultSet, GoesFetchError> {
        let queries = plan(request);
        let total = queries.len();

        log::info!(
            "Searching {} for {} {} from {} to {}: {} queries",
            request.bucket(),
            request.product(),
            request
                .bands()
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(","),
            request.start(),
            request.end(),
            total
        );

        if total == 0 {
            return Ok(SearchResultSet::empty(request.bucket()));
        }

        let (to_coordinator, query_results) = unbounded::<QueryResult>();
        let abort = Arc::new(AtomicBool::new(false));

        // One thread per query, so every listing is in flight at once.
        let pool = threadpool::ThreadPool::with_name("Listing Thread".to_owned(), total);

        for query in queries {
            let remote = self.remote.clone();
            let request = request.clone();
            let to_coordinator = to_coordinator.clone();
            let abort = Arc::clone(&abort);
            let max_keys = self.max_keys;

            pool.execute(move || {
                if abort.load(Ordering::SeqCst) {
                    return;
                }

                let res = run_query(&remote, &request, &query, max_keys);

                // The coordinator stops listening after a failure.
                let _ = to_coordinator.send(res);
            });
        }

        drop(to_coordinator);

        let mut objects: Vec<ObjectDescriptor> = vec![];
        let mut done = 0;

        while done < total {
            let res = match query_results.recv() {
                Ok(res) => res,
                Err(_) => {
                    abort.store(true, Ordering::SeqCst);
                    return Err(GoesFetchError::Coordinator(format!(
                        "listing workers stopped after {} of {} queries",
                        done, total
                    )));
                }
            };

            match res {
                Ok(found) => objects.extend(found),
                Err(err) => {
                    abort.store(true, Ordering::SeqCst);
                    log::error!("Search failed: {}", err);
                    return Err(err);
                }
            }

            done += 1;
            self.observer.query_completed(done, total);
        }

        log::info!("Found {} objects in {}", objects.len(), request.bucket());

        Ok(SearchResultSet::new(request.bucket(), objects))
    }
}

fn run_query<RA: RemoteArchive>(
    remote: &RA,
    request: &SearchRequest,
    query: &ListingQuery,
    max_keys: usize,
) -> QueryResult {
    let search_err = |source: RemoteError| GoesFetchError::Search {
        prefix: query.prefix.clone(),
        source,
    };

    log::debug!("Listing {}", query.prefix);

    let listed = remote
        .list_objects(request.bucket(), &query.prefix, max_keys)
        .map_err(search_err)?;

    let mut keep = Vec::with_capacity(listed.len());
    for obj in listed {
        let scan_start = obj
            .acquisition_time()
            .map_err(|err| search_err(Box::new(err)))?;

        if request.contains(&scan_start) {
            keep.push(obj);
        }
    }

    Ok(keep)
}
