use crate::{error::RemoteError, object::ObjectDescriptor};
use std::io::Write;

/// The object store holding the archive.
///
/// Implementations are shared across worker threads, so they must be cheap to clone.
pub trait RemoteArchive: Clone + Send + Sync + 'static {
    /// List at most `max_keys` objects in `bucket` whose keys start with `prefix`.
    fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        max_keys: usize,
    ) -> Result<Vec<ObjectDescriptor>, RemoteError>;

    /// Copy the contents of one object into `sink`.
    fn fetch_object(&self, bucket: &str, key: &str, sink: &mut dyn Write) -> Result<(), RemoteError>;
}
