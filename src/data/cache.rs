//! Time-bounded cache around the data loader.

use super::loader::{DataLoader, LoadError};
use super::model::Dataset;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One day, the default lifetime of a loaded dataset.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct CacheEntry {
    value: Arc<Dataset>,
    loaded_at: Instant,
}

/// Keeps the last loaded dataset for `ttl` before reading the source again.
///
/// Invalidation is time based or explicit; file changes are not watched.
pub struct DatasetCache {
    source: PathBuf,
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl DatasetCache {
    pub fn new(source: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            source: source.into(),
            ttl,
            entry: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Whether a cached dataset exists and is still within its lifetime.
    pub fn is_fresh(&self) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|e| e.loaded_at.elapsed() < self.ttl)
    }

    /// Return the cached dataset, reloading it once the entry has expired.
    ///
    /// A failed load clears the cache and returns the error.
    pub fn get(&mut self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(entry) = self.entry.as_ref().filter(|_| self.is_fresh()) {
            log::debug!("Dataset cache hit for {}", self.source.display());
            return Ok(Arc::clone(&entry.value));
        }

        self.entry = None;
        log::info!("Loading dataset from {}", self.source.display());
        let value = Arc::new(DataLoader::load(&self.source)?);
        self.entry = Some(CacheEntry {
            value: Arc::clone(&value),
            loaded_at: Instant::now(),
        });
        Ok(value)
    }

    /// Drop the cached dataset; the next `get` reads the source.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            log::debug!("Dataset cache invalidated for {}", self.source.display());
        }
    }

    /// Force a fresh read of the source.
    pub fn reload(&mut self) -> Result<Arc<Dataset>, LoadError> {
        self.invalidate();
        self.get()
    }

    /// Point the cache at another source file.
    pub fn set_source(&mut self, source: impl Into<PathBuf>) {
        self.source = source.into();
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CSV: &str = "YEAR,MONTH,COST,ELECTRICITY\n2022,1,100,10\n2022,2,200,20\n";

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_hit_within_ttl() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "costs.csv", CSV);
        let mut cache = DatasetCache::new(&path, DEFAULT_TTL);

        let first = cache.get().unwrap();
        fs::remove_file(&path).unwrap();
        let second = cache.get().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_fresh());
    }

    #[test]
    fn test_expired_entry_reloads() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "costs.csv", CSV);
        let mut cache = DatasetCache::new(&path, Duration::ZERO);

        let first = cache.get().unwrap();
        assert!(!cache.is_fresh());
        let second = cache.get().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalidate_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "costs.csv", CSV);
        let mut cache = DatasetCache::new(&path, DEFAULT_TTL);

        assert_eq!(cache.get().unwrap().len(), 2);
        fs::write(&path, "YEAR,MONTH,COST,ELECTRICITY\n2023,1,1,1\n").unwrap();
        assert_eq!(cache.get().unwrap().len(), 2);

        cache.invalidate();
        assert!(!cache.is_fresh());
        assert_eq!(cache.get().unwrap().len(), 1);

        fs::write(&path, CSV).unwrap();
        assert_eq!(cache.reload().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_reload_clears_entry() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "costs.csv", CSV);
        let mut cache = DatasetCache::new(&path, DEFAULT_TTL);

        cache.get().unwrap();
        fs::remove_file(&path).unwrap();

        assert!(matches!(cache.reload(), Err(LoadError::NotFound(_))));
        assert!(!cache.is_fresh());
        assert!(cache.get().is_err());
    }

    #[test]
    fn test_set_source() {
        let dir = TempDir::new().unwrap();
        let first = write_csv(&dir, "a.csv", CSV);
        let second = write_csv(&dir, "b.csv", "YEAR,MONTH,COST,ELECTRICITY\n2024,3,1,1\n");
        let mut cache = DatasetCache::new(&first, DEFAULT_TTL);

        assert_eq!(cache.get().unwrap().latest_year(), Some(2022));
        cache.set_source(&second);
        assert_eq!(cache.source(), second.as_path());
        assert_eq!(cache.get().unwrap().latest_year(), Some(2024));
    }
}
