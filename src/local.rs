use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

/// The local filesystem the archive is mirrored into.
pub trait LocalStore: Clone + Send + Sync + 'static {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents. Succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create (or truncate) a file for writing.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DiskStore;

impl LocalStore for DiskStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            log::debug!("Creating path: {:?}", path);
        }
        fs::create_dir_all(path)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        let f = File::create(path)?;
        Ok(Box::new(BufWriter::new(f)))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_disk_store_write_and_rename() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore;

        let nested = dir.path().join("a/b/c");
        store.create_dir_all(&nested).unwrap();
        store.create_dir_all(&nested).unwrap();
        assert!(store.exists(&nested));

        let part = nested.join("f.nc.part");
        let done = nested.join("f.nc");
        {
            let mut w = store.create(&part).unwrap();
            w.write_all(b"data").unwrap();
            w.flush().unwrap();
        }
        store.rename(&part, &done).unwrap();

        assert!(!store.exists(&part));
        assert_eq!(fs::read(&done).unwrap(), b"data");

        store.remove_file(&done).unwrap();
        assert!(!store.exists(&done));
    }
}
