use crate::{
    error::GoesFetchError,
    product::{Band, Product, ScanMode},
    satellite::Satellite,
};
use chrono::{DateTime, Utc};

/// A validated, immutable description of what to search for.
///
/// Only constructible through [`SearchRequest::new`] or [`SearchRequestBuilder`], both of which
/// reject an empty band list and a time range where `start >= end`.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRequest {
    satellite: Satellite,
    product: Product,
    scan_mode: ScanMode,
    bands: Vec<Band>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SearchRequest {
    pub fn new(
        satellite: Satellite,
        product: Product,
        bands: &[Band],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, GoesFetchError> {
        Self::builder()
            .satellite(satellite)
            .product(product)
            .bands(bands.iter().copied())
            .start(start)
            .end(end)
            .build()
    }

    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::default()
    }

    pub fn satellite(&self) -> Satellite {
        self.satellite
    }

    pub fn bucket(&self) -> &'static str {
        self.satellite.bucket_name()
    }

    pub fn product(&self) -> Product {
        self.product
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.scan_mode
    }

    /// Bands in the order they were given, without duplicates.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// True if `time` lies strictly inside the requested window.
    pub fn contains(&self, time: &DateTime<Utc>) -> bool {
        self.start < *time && *time < self.end
    }
}

#[derive(Clone, Debug, Default)]
pub struct SearchRequestBuilder {
    satellite: Satellite,
    product: Product,
    scan_mode: ScanMode,
    bands: Vec<Band>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl SearchRequestBuilder {
    pub fn satellite(mut self, satellite: Satellite) -> Self {
        self.satellite = satellite;
        self
    }

    pub fn product(mut self, product: Product) -> Self {
        self.product = product;
        self
    }

    pub fn scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }

    pub fn band(mut self, band: Band) -> Self {
        self.bands.push(band);
        self
    }

    pub fn bands<I>(mut self, bands: I) -> Self
    where
        I: IntoIterator<Item = Band>,
    {
        self.bands.extend(bands);
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn build(self) -> Result<SearchRequest, GoesFetchError> {
        let start = self
            .start
            .ok_or_else(|| GoesFetchError::InvalidRequest("missing start time".into()))?;
        let end = self
            .end
            .ok_or_else(|| GoesFetchError::InvalidRequest("missing end time".into()))?;

        if end <= start {
            log::error!("End not after start: start - {} end - {}", start, end);
            return Err(GoesFetchError::InvalidRequest(format!(
                "end ({}) must be after start ({})",
                end, start
            )));
        }

        let mut bands: Vec<Band> = Vec::with_capacity(self.bands.len());
        for band in self.bands {
            if !bands.contains(&band) {
                bands.push(band);
            }
        }

        if bands.is_empty() {
            return Err(GoesFetchError::InvalidRequest(
                "at least one band is required".into(),
            ));
        }

        Ok(SearchRequest {
            satellite: self.satellite,
            product: self.product,
            scan_mode: self.scan_mode,
            bands,
            start,
            end,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.ymd(2017, 8, 21).and_hms(hour, 0, 0)
    }

    #[test]
    fn test_defaults() {
        let req = SearchRequest::builder()
            .band(Band::C01)
            .start(t(10))
            .end(t(14))
            .build()
            .unwrap();

        assert_eq!(req.satellite(), Satellite::GOES16);
        assert_eq!(req.bucket(), "noaa-goes16");
        assert_eq!(req.product(), Product::RadC);
        assert_eq!(req.scan_mode(), ScanMode::M3);
    }

    #[test]
    fn test_rejects_bad_ranges() {
        for (start, end) in &[(t(10), t(10)), (t(12), t(10))] {
            let res = SearchRequest::new(Satellite::GOES16, Product::RadC, &[Band::C01], *start, *end);
            assert!(matches!(res, Err(GoesFetchError::InvalidRequest(_))));
        }

        let res = SearchRequest::builder().band(Band::C01).start(t(1)).build();
        assert!(matches!(res, Err(GoesFetchError::InvalidRequest(_))));
    }

    #[test]
    fn test_rejects_empty_bands() {
        let res = SearchRequest::new(Satellite::GOES16, Product::RadC, &[], t(10), t(11));
        assert!(matches!(res, Err(GoesFetchError::InvalidRequest(_))));
    }

    #[test]
    fn test_dedups_bands_keeping_order() {
        let req = SearchRequest::new(
            Satellite::GOES17,
            Product::RadF,
            &[Band::C13, Band::C02, Band::C13],
            t(10),
            t(11),
        )
        .unwrap();

        assert_eq!(req.bands(), &[Band::C13, Band::C02]);
    }

    #[test]
    fn test_contains_is_exclusive() {
        let req = SearchRequest::new(Satellite::GOES16, Product::RadC, &[Band::C01], t(10), t(14))
            .unwrap();

        assert!(!req.contains(&t(10)));
        assert!(req.contains(&Utc.ymd(2017, 8, 21).and_hms_milli(10, 0, 0, 100)));
        assert!(req.contains(&t(13)));
        assert!(!req.contains(&t(14)));
    }
}
