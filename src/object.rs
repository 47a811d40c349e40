use crate::{error::GoesFetchError, timestamp::extract_timestamp};
use chrono::{DateTime, Utc};

/// A file located in the remote archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectDescriptor {
    pub key: String,
    pub size: u64,
}

impl ObjectDescriptor {
    pub fn new<S: Into<String>>(key: S, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }

    /// The scan start time encoded in the key.
    pub fn acquisition_time(&self) -> Result<DateTime<Utc>, GoesFetchError> {
        extract_timestamp(&self.key)
    }

    /// Everything after the last `/` of the key.
    pub fn file_name(&self) -> &str {
        match self.key.rfind('/') {
            Some(i) => &self.key[(i + 1)..],
            None => &self.key,
        }
    }
}

/// The objects found by one search, all from the same bucket.
///
/// Objects are kept in the order their listing queries completed, which is generally *not*
/// chronological. Use [`SearchResultSet::sort_chronologically`] if that matters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResultSet {
    bucket: String,
    objects: Vec<ObjectDescriptor>,
}

impl SearchResultSet {
    pub fn new<S: Into<String>>(bucket: S, objects: Vec<ObjectDescriptor>) -> Self {
        Self {
            bucket: bucket.into(),
            objects,
        }
    }

    pub fn empty<S: Into<String>>(bucket: S) -> Self {
        Self::new(bucket, vec![])
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn objects(&self) -> &[ObjectDescriptor] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<ObjectDescriptor> {
        self.objects.iter()
    }

    pub fn total_size(&self) -> u64 {
        self.objects.iter().map(|obj| obj.size).sum()
    }

    /// Order by acquisition time, then key. Keys without a valid time sort last.
    pub fn sort_chronologically(&mut self) {
        self.objects.sort_by_cached_key(|obj| {
            let time = obj.acquisition_time().ok();
            (time.is_none(), time, obj.key.clone())
        });
    }

    pub fn into_objects(self) -> Vec<ObjectDescriptor> {
        self.objects
    }
}

impl IntoIterator for SearchResultSet {
    type Item = ObjectDescriptor;
    type IntoIter = std::vec::IntoIter<ObjectDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

impl<'a> IntoIterator for &'a SearchResultSet {
    type Item = &'a ObjectDescriptor;
    type IntoIter = std::slice::Iter<'a, ObjectDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
