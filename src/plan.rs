use crate::{
    product::{Band, Product, ScanMode},
    request::SearchRequest,
};
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

/// One listing query: every object for `band` in the UTC hour containing `cursor`.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingQuery {
    pub cursor: DateTime<Utc>,
    pub band: Band,
    pub prefix: String,
}

/// Enumerate the listing queries needed to cover the request.
///
/// The cursor starts at the start time and advances an hour at a time while it is before the end
/// time. Queries come out in chronological order, and within an hour in the order of
/// `request.bands()`.
pub fn plan(request: &SearchRequest) -> Vec<ListingQuery> {
    let mut queries = Vec::with_capacity(query_count(request));

    for cursor in cursors(request) {
        for &band in request.bands() {
            let prefix = build_prefix(request.product(), request.scan_mode(), band, &cursor);
            queries.push(ListingQuery {
                cursor,
                band,
                prefix,
            });
        }
    }

    queries
}

/// The number of queries [`plan`] will produce, without building them: the window length in
/// hours, rounded up, times the number of bands.
pub fn query_count(request: &SearchRequest) -> usize {
    let span = request.end() - request.start();
    let secs = span.num_seconds();
    let whole_hours = secs / 3600;
    let partial = secs % 3600 != 0 || span > Duration::seconds(secs);

    let hours = (whole_hours + if partial { 1 } else { 0 }) as usize;
    hours * request.bands().len()
}

/// The archive prefix for one product/band/hour, e.g.
/// `ABI-L1b-RadC/2017/233/10/OR_ABI-L1b-RadC-M3C01`.
pub fn build_prefix(product: Product, mode: ScanMode, band: Band, hour: &DateTime<Utc>) -> String {
    let prod: &'static str = product.into();

    format!(
        "{}/{:04}/{:03}/{:02}/OR_{}-{}{}",
        prod,
        hour.year(),
        hour.ordinal(),
        hour.hour(),
        prod,
        mode,
        band
    )
}

fn cursors(request: &SearchRequest) -> impl Iterator<Item = DateTime<Utc>> {
    let first = request.start();
    let end = request.end();

    (0..)
        .map(move |i| first + Duration::hours(i))
        .take_while(move |time| *time < end)
}
