use std::{error::Error, path::PathBuf, process};

use chrono::{DateTime, Utc};
use clap::Parser;
use goes_fetch::{
    AmazonS3NoaaBigData, Archive, Band, FetchConfig, LogProgress, Product, Satellite, ScanMode,
    SearchRequest,
};

/// Search the NOAA GOES buckets for ABI files and download them.
#[derive(Debug, Parser)]
#[command(name = "goes-fetch", version)]
struct Cli {
    /// Satellite to search (G16, G17, G18).
    #[arg(short, long, default_value = "G16")]
    satellite: Satellite,

    /// Product, e.g. ABI-L1b-RadC.
    #[arg(short, long, default_value = "ABI-L1b-RadC")]
    product: Product,

    /// Band to search, may be repeated (C01..C16).
    #[arg(short, long = "band", required = true)]
    bands: Vec<Band>,

    /// Scan mode in the file names.
    #[arg(long, default_value = "M3")]
    scan_mode: ScanMode,

    /// Start of the window (RFC 3339), exclusive.
    #[arg(long)]
    start: DateTime<Utc>,

    /// End of the window (RFC 3339), exclusive.
    #[arg(long)]
    end: DateTime<Utc>,

    /// Directory the bucket is mirrored into.
    #[arg(short, long, default_value = "./s3")]
    output: PathBuf,

    /// Simultaneous downloads.
    #[arg(long, default_value_t = FetchConfig::default().concurrency)]
    concurrency: usize,

    /// Extra attempts per file after a failed transfer.
    #[arg(long, default_value_t = FetchConfig::default().max_retries)]
    retries: u32,

    /// Most objects returned by one listing query.
    #[arg(long, default_value_t = FetchConfig::default().max_keys)]
    max_keys: usize,

    /// Only print what the search found.
    #[arg(long)]
    list_only: bool,

    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logger(&cli);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            log::error!("{}", err);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, Box<dyn Error + Send + Sync>> {
    log::debug!("CLI arguments: {:?}", cli);

    let request = SearchRequest::builder()
        .satellite(cli.satellite)
        .product(cli.product)
        .scan_mode(cli.scan_mode)
        .bands(cli.bands.iter().copied())
        .start(cli.start)
        .end(cli.end)
        .build()?;

    let config = FetchConfig::default()
        .with_output_root(&cli.output)
        .with_concurrency(cli.concurrency)
        .with_max_retries(cli.retries)
        .with_max_keys(cli.max_keys);

    let remote = AmazonS3NoaaBigData::connect()?;
    let archive = Archive::connect(&cli.output, remote)
        .with_config(config)
        .with_observer(LogProgress);

    println!("Querying S3 for GOES scenes...");
    let mut results = archive.search(request).wait()?;
    println!("{} files found", results.len());

    if cli.list_only {
        results.sort_chronologically();
        for obj in &results {
            println!("{}\t{}", obj.key, obj.size);
        }
        return Ok(0);
    }

    let report = archive.download_all(results).wait()?;
    println!(
        "{} downloaded, {} skipped, {} failed",
        report.num_downloaded(),
        report.num_skipped(),
        report.num_failed()
    );

    for (key, reason) in report.failures() {
        eprintln!("failed: {}: {}", key, reason);
    }

    Ok(if report.num_failed() > 0 { 2 } else { 0 })
}

fn init_logger(cli: &Cli) {
    use env_logger::Env;
    use log::LevelFilter;

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp_secs();
    let _ = builder.try_init();
}
