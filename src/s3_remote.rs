use crate::{
    error::{GoesFetchError, RemoteError},
    object::ObjectDescriptor,
    remote::RemoteArchive,
};
use s3::{bucket::Bucket, creds::Credentials, region::Region};
use std::io::Write;

/// Anonymous access to the NOAA GOES buckets on Amazon S3.
#[derive(Debug, Clone)]
pub struct AmazonS3NoaaBigData {
    region: Region,
    credentials: Credentials,
}

impl AmazonS3NoaaBigData {
    pub fn connect() -> Result<Self, RemoteError> {
        let region = Region::UsEast1;
        let credentials = Credentials::anonymous()?;

        log::info!("Connected to S3 region: {}", region);

        Ok(AmazonS3NoaaBigData {
            region,
            credentials,
        })
    }

    fn get_bucket(&self, bucket: &str) -> Result<Bucket, RemoteError> {
        let bucket = Bucket::new(bucket, self.region.clone(), self.credentials.clone())?;
        Ok(bucket)
    }
}

impl RemoteArchive for AmazonS3NoaaBigData {
    fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        max_keys: usize,
    ) -> Result<Vec<ObjectDescriptor>, RemoteError> {
        let bucket = self.get_bucket(bucket)?;

        let results = bucket.list_blocking(prefix.to_owned(), None)?;

        let listed: Vec<ObjectDescriptor> = results
            .iter()
            .flat_map(|res| res.contents.iter())
            .map(|obj| ObjectDescriptor::new(obj.key.clone(), obj.size))
            .collect();

        let objects = limit_listing(prefix, listed, max_keys);
        log::debug!("Listed {} objects under {}", objects.len(), prefix);

        Ok(objects)
    }

    fn fetch_object(&self, bucket: &str, key: &str, sink: &mut dyn Write) -> Result<(), RemoteError> {
        let bucket = self.get_bucket(bucket)?;

        let (data, code) = bucket.get_object_blocking(key)?;

        if code != 200 {
            return Err(Box::new(GoesFetchError::Transfer(format!(
                "download of {} returned HTTP status {}",
                key, code
            ))));
        }

        sink.write_all(&data)?;
        sink.flush()?;

        Ok(())
    }
}

fn limit_listing(
    prefix: &str,
    mut listed: Vec<ObjectDescriptor>,
    max_keys: usize,
) -> Vec<ObjectDescriptor> {
    if listed.len() > max_keys {
        log::warn!(
            "Listing under {} returned {} objects, keeping the first {}",
            prefix,
            listed.len(),
            max_keys
        );
        listed.truncate(max_keys);
    }

    listed
}
