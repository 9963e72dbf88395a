//! Storage seam
//!
//! The catalog only talks to the filesystem through [`Storage`], so tests can
//! substitute failing or synthetic backends.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Kind of thing found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Unknown,
    Error,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            EntryType::File => "file",
            EntryType::Dir => "directory",
            EntryType::Unknown => "unknown",
            EntryType::Error => "error",
        };
        f.write_str(s)
    }
}

/// Result of a stat call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Read-only access to the media tree.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Classify a path. Never fails: I/O problems map to [`EntryType::Error`].
    async fn entry_type(&self, path: &Path) -> EntryType;

    /// Names of the entries in a directory.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Stat a single path, following symlinks.
    async fn stat(&self, path: &Path) -> io::Result<EntryMeta>;

    /// Read a whole file.
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`Storage`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

#[async_trait]
impl Storage for FsStorage {
    async fn entry_type(&self, path: &Path) -> EntryType {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => EntryType::Dir,
            Ok(meta) if meta.is_file() => EntryType::File,
            Ok(_) => EntryType::Unknown,
            Err(e) if e.kind() == io::ErrorKind::NotFound => EntryType::Unknown,
            Err(e) => {
                tracing::debug!("stat {} failed: {}", path.display(), e);
                EntryType::Error
            }
        }
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut dir = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    async fn stat(&self, path: &Path) -> io::Result<EntryMeta> {
        let meta = tokio::fs::metadata(path).await?;
        Ok(EntryMeta {
            is_dir: meta.is_dir(),
            size: meta.len(),
            modified: meta.modified().ok(),
        })
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}
