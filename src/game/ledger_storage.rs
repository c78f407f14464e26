use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Text medium the high-score ledger is persisted to.
pub trait LedgerStorage {
    /// Held for the duration of a read-modify-write; releases on drop.
    type Guard;

    /// Blocks until no other writer, in this process or another, holds the storage.
    fn lock(&self) -> io::Result<Self::Guard>;

    /// `Ok(None)` when nothing has been written yet.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replaces the stored text as a whole.
    fn write(&mut self, contents: &str) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the exclusive lock is taken on. The ledger itself is
    /// replaced by rename on every write, so it cannot carry the lock.
    pub fn lock_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".lock");
        self.path.with_file_name(file_name)
    }

    fn parent_dir(&self) -> io::Result<&Path> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        Ok(dir)
    }
}

impl LedgerStorage for FileStorage {
    type Guard = fs::File;

    fn lock(&self) -> io::Result<fs::File> {
        self.parent_dir()?;
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        file.lock()?;
        Ok(file)
    }

    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        // a fresh temp file per write, renamed over the target
        let mut tmp = NamedTempFile::new_in(self.parent_dir()?)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl LedgerStorage for MemoryStorage {
    type Guard = ();

    fn lock(&self) -> io::Result<()> {
        Ok(())
    }

    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("high_scores.json"));
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_file_storage_creates_directories_and_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("high_scores.json");
        let mut storage = FileStorage::new(&path);

        storage.write("first").unwrap();
        storage.write("second").unwrap();

        assert_eq!(storage.read().unwrap().as_deref(), Some("second"));
        assert_eq!(storage.path(), path.as_path());
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .filter(|name| name != "high_scores.json")
            .collect();
        assert!(leftovers.is_empty(), "stray files: {leftovers:?}");
    }

    #[test]
    fn test_file_storage_lock_is_exclusive_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("high_scores.json"));
        assert_eq!(storage.lock_path(), dir.path().join("high_scores.json.lock"));

        let guard = storage.lock().unwrap();
        let other = fs::OpenOptions::new()
            .write(true)
            .open(storage.lock_path())
            .unwrap();
        assert!(other.try_lock().is_err());

        drop(guard);
        assert!(other.try_lock().is_ok());
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::default();
        assert_eq!(storage.read().unwrap(), None);
        storage.write("{}").unwrap();
        assert_eq!(storage.contents(), Some("{}"));
        assert_eq!(
            MemoryStorage::with_contents("x").read().unwrap().as_deref(),
            Some("x")
        );
    }
}
