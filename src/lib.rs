//! Find GOES-R ABI files in the NOAA buckets on Amazon S3 by time window, product, and band, and
//! mirror them onto local disk.
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use goes_fetch::{AmazonS3NoaaBigData, Archive, Band, Product, SearchRequest, Satellite};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let remote = AmazonS3NoaaBigData::connect()?;
//! let archive = Archive::connect("./s3", remote);
//!
//! let request = SearchRequest::new(
//!     Satellite::GOES16,
//!     Product::RadC,
//!     &[Band::C01],
//!     Utc.ymd(2017, 8, 21).and_hms(10, 0, 0),
//!     Utc.ymd(2017, 8, 21).and_hms(14, 0, 0),
//! )?;
//!
//! let results = archive.search(request).wait()?;
//! let report = archive.download_all(results).wait()?;
//! println!("{} failed", report.num_failed());
//! # Ok(())
//! # }
//! ```

/**************************************************************************************************
 *                                           Public API
 *************************************************************************************************/
pub use crate::{
    archive::Archive,
    config::FetchConfig,
    download::{local_path_for, DownloadCoordinator, DownloadOutcome, DownloadReport},
    error::{GoesFetchError, RemoteError},
    local::{DiskStore, LocalStore},
    object::{ObjectDescriptor, SearchResultSet},
    pending::Pending,
    plan::{build_prefix, plan, query_count, ListingQuery},
    product::{Band, Product, ScanMode},
    progress::{LogProgress, NoProgress, ProgressObserver},
    remote::RemoteArchive,
    request::{SearchRequest, SearchRequestBuilder},
    s3_remote::AmazonS3NoaaBigData,
    satellite::Satellite,
    search::SearchCoordinator,
    timestamp::{extract_timestamp, format_start_token},
};
/**************************************************************************************************
 *                                      Private Implementation
 *************************************************************************************************/
mod archive;
mod config;
mod download;
mod error;
mod local;
mod object;
mod pending;
mod plan;
mod product;
mod progress;
mod remote;
mod request;
mod s3_remote;
mod satellite;
mod search;
mod timestamp;
