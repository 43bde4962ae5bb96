//! Local filesystem object lister.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use broker_core::error::{AppError, ErrorKind};
use broker_core::result::AppResult;
use broker_core::traits::lister::ObjectLister;
use broker_core::types::pool::PoolLocation;

/// Lists files below a local directory as if it were a bucket.
///
/// Keys are `/`-separated paths relative to the root, so a file at
/// `<root>/deploy/license/lic1.lic` is listed as `deploy/license/lic1.lic`.
#[derive(Debug, Clone)]
pub struct LocalLister {
    /// Directory standing in for the bucket root.
    root: PathBuf,
}

impl LocalLister {
    /// Create a lister rooted at the given path.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root: root_path.into(),
        }
    }

    /// Resolve a key prefix to a directory within the root.
    fn resolve(&self, prefix: &str) -> PathBuf {
        let clean = prefix.trim_matches('/');
        if clean.is_empty() {
            self.root.clone()
        } else {
            self.root.join(clean)
        }
    }

    /// Convert an absolute path under the root into an object key.
    fn key_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

#[async_trait]
impl ObjectLister for LocalLister {
    fn scheme(&self) -> &str {
        "file"
    }

    async fn list_keys(&self, pool: &PoolLocation) -> AppResult<Vec<String>> {
        let start = self.resolve(&pool.prefix);
        match fs::try_exists(&start).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(path = %start.display(), "Catalog directory does not exist, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::CatalogUnavailable,
                    format!("Failed to stat catalog directory: {}", start.display()),
                    e,
                ));
            }
        }

        let mut keys = Vec::new();
        let mut pending = vec![start];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::CatalogUnavailable,
                    format!("Failed to read directory: {}", dir.display()),
                    e,
                )
            })?;

            while let Some(entry) = entries.next_entry().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::CatalogUnavailable,
                    format!("Failed to read entry in: {}", dir.display()),
                    e,
                )
            })? {
                let path = entry.path();
                let file_type = entry.file_type().await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::CatalogUnavailable,
                        format!("Failed to stat: {}", path.display()),
                        e,
                    )
                })?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if let Some(key) = self.key_for(&path) {
                    keys.push(key);
                }
            }
        }

        keys.sort();
        debug!(prefix = %pool.prefix, count = keys.len(), "Listed local catalog");
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, key: &str) {
        let path = root.join(key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"license").unwrap();
    }

    #[tokio::test]
    async fn test_list_nested_keys_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "deploy/license/lic2.lic");
        touch(dir.path(), "deploy/license/lic1.lic");
        touch(dir.path(), "deploy/license/old/lic0.lic");
        touch(dir.path(), "deploy/other/readme.txt");

        let lister = LocalLister::new(dir.path());
        let pool = PoolLocation::new("bucket", "deploy", "license");
        let keys = lister.list_keys(&pool).await.unwrap();

        assert_eq!(
            keys,
            vec![
                "deploy/license/lic1.lic".to_string(),
                "deploy/license/lic2.lic".to_string(),
                "deploy/license/old/lic0.lic".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let lister = LocalLister::new(dir.path());
        let pool = PoolLocation::new("bucket", "nowhere", "license");
        assert!(lister.list_keys(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_in_prefix_path_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("deploy"), b"not a directory").unwrap();

        let lister = LocalLister::new(dir.path());
        let pool = PoolLocation::new("bucket", "deploy", "license");
        let err = lister.list_keys(&pool).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::CatalogUnavailable);
    }
}
