use std::path::PathBuf;

pub const DEFAULT_MAX_KEYS: usize = 100;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_OUTPUT_ROOT: &str = "./s3";

/// Tunables for searching and downloading.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchConfig {
    /// Most objects returned by a single listing query.
    pub max_keys: usize,
    /// Extra attempts after a failed transfer, per object.
    pub max_retries: u32,
    /// Simultaneous downloads.
    pub concurrency: usize,
    /// Files land in `<output_root>/<bucket>/<key>`.
    pub output_root: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_keys: DEFAULT_MAX_KEYS,
            max_retries: DEFAULT_MAX_RETRIES,
            concurrency: DEFAULT_CONCURRENCY,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
        }
    }
}

impl FetchConfig {
    pub fn with_output_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys.max(1);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
