//! Cache Store Module
//!
//! Directory-backed byte store: one `<key>.jpeg` file per cached image.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use tokio::fs;
use tracing::debug;

use crate::cache::{CacheKey, CacheStats, StatsSnapshot, CACHE_FILE_EXTENSION};
use crate::error::{ProxyError, Result};

// == Cache Store ==
/// On-disk image cache rooted at a single directory.
///
/// The store exclusively owns the files under its root; no other component
/// reads or writes them. There is no locking: concurrent writes for the
/// same key are idempotent-by-content, and reads see whatever atomicity the
/// filesystem's whole-file operations provide.
#[derive(Debug)]
pub struct CacheStore {
    /// Cache root directory
    root: PathBuf,
    /// Hit/miss counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore rooted at the given directory.
    ///
    /// The directory is not touched until [`CacheStore::init`] runs.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            stats: CacheStats::new(),
        }
    }

    // == Init ==
    /// Creates the cache root (including parents) and resolves it to its
    /// absolute form. Must complete before the server accepts traffic;
    /// repeated calls are idempotent.
    pub async fn init(&mut self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        self.root = fs::canonicalize(&self.root).await?;
        debug!(root = %self.root.display(), "cache directory ready");
        Ok(())
    }

    /// Returns the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // == Key To Path ==
    /// Maps a key to its cache file path: `root/<key>.jpeg`.
    ///
    /// Deterministic, and injective for distinct valid keys since the key
    /// string is the whole filename stem.
    pub(crate) fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root
            .join(format!("{}.{}", key.as_str(), CACHE_FILE_EXTENSION))
    }

    // == Get ==
    /// Reads the full byte content cached for a key.
    ///
    /// Fails with `NotFound` if no file exists for the key, and with `Io`
    /// for any other read failure.
    pub async fn get(&self, key: &CacheKey) -> Result<Bytes> {
        match fs::read(self.entry_path(key)).await {
            Ok(data) => {
                self.stats.record_hit();
                Ok(Bytes::from(data))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.stats.record_miss();
                Err(ProxyError::NotFound(key.to_string()))
            }
            Err(err) => Err(ProxyError::Io(err)),
        }
    }

    // == Put ==
    /// Writes (creating or truncating) the cache file for a key.
    ///
    /// Fully replaces any prior content for the same key.
    pub async fn put(&self, key: &CacheKey, data: &[u8]) -> Result<()> {
        fs::write(self.entry_path(key), data).await?;
        debug!(key = %key, bytes = data.len(), "cached image");
        Ok(())
    }

    // == Delete ==
    /// Removes the cache file for a key.
    ///
    /// Fails with `NotFound` if the entry is absent.
    pub async fn delete(&self, key: &CacheKey) -> Result<()> {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ProxyError::NotFound(key.to_string()))
            }
            Err(err) => Err(ProxyError::Io(err)),
        }
    }

    // == Stats ==
    /// Returns a snapshot of the hit/miss counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn key(raw: &str) -> CacheKey {
        CacheKey::parse(raw).unwrap()
    }

    async fn test_store() -> (tempfile::TempDir, CacheStore) {
        let dir = tempdir().unwrap();
        let mut store = CacheStore::new(dir.path());
        store.init().await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_init_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = CacheStore::new(&nested);
        store.init().await.unwrap();

        assert!(nested.is_dir());
        assert!(store.root().is_absolute());
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut store = CacheStore::new(dir.path());
        store.init().await.unwrap();
        store.init().await.unwrap();
    }

    #[tokio::test]
    async fn test_put_and_get_round_trip() {
        let (_dir, store) = test_store().await;

        store.put(&key("200"), b"image bytes").await.unwrap();
        let data = store.get(&key("200")).await.unwrap();

        assert_eq!(&data[..], b"image bytes");
    }

    #[tokio::test]
    async fn test_get_missing_entry() {
        let (_dir, store) = test_store().await;

        let result = store.get(&key("404")).await;
        assert!(matches!(result, Err(ProxyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_entry() {
        let (_dir, store) = test_store().await;

        store.put(&key("200"), b"first").await.unwrap();
        store.put(&key("200"), b"second").await.unwrap();

        let data = store.get(&key("200")).await.unwrap();
        assert_eq!(&data[..], b"second");
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let (_dir, store) = test_store().await;

        store.put(&key("200"), b"bytes").await.unwrap();
        store.delete(&key("200")).await.unwrap();

        assert!(matches!(
            store.get(&key("200")).await,
            Err(ProxyError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_entry() {
        let (_dir, store) = test_store().await;

        let result = store.delete(&key("200")).await;
        assert!(matches!(result, Err(ProxyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_io_error_is_not_not_found() {
        let (_dir, store) = test_store().await;

        // A directory where the cache file should be: read fails, but the
        // entry is not "missing", so the error must stay an Io error.
        tokio::fs::create_dir(store.entry_path(&key("500")))
            .await
            .unwrap();

        let result = store.get(&key("500")).await;
        assert!(matches!(result, Err(ProxyError::Io(_))));
    }

    #[tokio::test]
    async fn test_entry_path_layout() {
        let (_dir, store) = test_store().await;

        let path = store.entry_path(&key("418"));
        assert_eq!(path.parent().unwrap(), store.root());
        assert_eq!(path.file_name().unwrap(), "418.jpeg");
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let (_dir, store) = test_store().await;

        store.put(&key("200"), b"bytes").await.unwrap();
        store.get(&key("200")).await.unwrap();
        let _ = store.get(&key("404")).await;

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
