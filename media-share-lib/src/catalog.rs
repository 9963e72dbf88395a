//! Media catalog
//!
//! Classifies request paths, lists directories and reads files, all through
//! the secure path resolver so nothing outside the media root is reachable.

use futures::future::{join_all, BoxFuture, FutureExt};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{MediaError, Result};
use crate::path::{self, MediaRoot, ParsedPath, PathLink};
use crate::size::format_size;
use crate::storage::{EntryType, FsStorage, Storage};

/// Video extensions the player can handle.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4"];

/// Subtitle extensions the transcoder can convert.
pub const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "sub"];

/// Recursion limit for directory sizing, guards against symlink cycles.
const MAX_SIZE_DEPTH: usize = 64;

/// One directory entry as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaStat {
    pub name: String,
    /// Human readable size
    pub size: String,
    /// Raw size in bytes
    pub bytes: u64,
    /// URL-encoded link to the entry
    pub link: String,
    pub is_dir: bool,
}

/// Directory listing options
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Report the recursive size of subdirectories instead of their own.
    pub dir_sizes: bool,
}

/// Catalog of everything below a media root.
#[derive(Debug, Clone)]
pub struct MediaCatalog<S = FsStorage> {
    root: MediaRoot,
    storage: S,
}

impl MediaCatalog<FsStorage> {
    /// Catalog over the local filesystem.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::new(MediaRoot::new(root), FsStorage)
    }
}

impl<S: Storage> MediaCatalog<S> {
    pub fn new(root: MediaRoot, storage: S) -> Self {
        Self { root, storage }
    }

    pub fn root(&self) -> &MediaRoot {
        &self.root
    }

    pub fn parse_path(&self, insecure_path: &str) -> ParsedPath {
        self.root.parse_path(insecure_path)
    }

    pub fn path_links(&self, insecure_path: &str, prefix: Option<&str>) -> Vec<PathLink> {
        path::path_links(insecure_path, prefix)
    }

    pub fn secure_url(&self, insecure_path: &str, prefix: Option<&str>) -> String {
        path::secure_url(insecure_path, prefix)
    }

    /// Classify a request path. Never fails.
    pub async fn entry_type(&self, insecure_path: &str) -> EntryType {
        if insecure_path.is_empty() {
            return EntryType::Error;
        }
        self.storage
            .entry_type(&self.root.secure_path(insecure_path))
            .await
    }

    /// List a directory, directories first.
    ///
    /// Entries are stat'ed concurrently. An entry whose stat fails is kept as a
    /// zero-size file rather than failing the listing.
    pub async fn list_dir(
        &self,
        insecure_path: &str,
        base_url: &str,
        options: ListOptions,
    ) -> Result<Vec<MediaStat>> {
        let dir = self.expect_type(insecure_path, EntryType::Dir).await?;
        let names = self.storage.read_dir(&dir).await?;

        let parent_segments = path::resolve_segments(insecure_path, None);
        let base_url = base_url.trim_end_matches('/');

        let mut stats = join_all(names.into_iter().map(|name| {
            self.stat_entry(&dir, &parent_segments, base_url, name, options)
        }))
        .await;

        sort_entries(&mut stats);
        tracing::debug!("listed {} entries in {}", stats.len(), dir.display());
        Ok(stats)
    }

    /// Read a whole file.
    pub async fn get_file(&self, insecure_path: &str) -> Result<Vec<u8>> {
        let file = self.expect_type(insecure_path, EntryType::File).await?;
        Ok(self.storage.read_file(&file).await?)
    }

    /// Resolve a path and require it to be of the given kind.
    pub(crate) async fn expect_type(
        &self,
        insecure_path: &str,
        expected: EntryType,
    ) -> Result<PathBuf> {
        if insecure_path.is_empty() {
            return Err(MediaError::InvalidPath(insecure_path.to_string()));
        }
        let path = self.root.secure_path(insecure_path);
        match self.storage.entry_type(&path).await {
            found if found == expected => Ok(path),
            EntryType::Unknown => Err(MediaError::NotFound(insecure_path.to_string())),
            found => Err(MediaError::WrongType {
                path: insecure_path.to_string(),
                expected,
                found,
            }),
        }
    }

    async fn stat_entry(
        &self,
        dir: &Path,
        parent_segments: &[String],
        base_url: &str,
        name: String,
        options: ListOptions,
    ) -> MediaStat {
        let path = dir.join(&name);
        let (is_dir, bytes) = match self.storage.stat(&path).await {
            Ok(meta) if meta.is_dir && options.dir_sizes => {
                (true, self.dir_size(&path, MAX_SIZE_DEPTH).await)
            }
            Ok(meta) => (meta.is_dir, meta.size),
            Err(e) => {
                tracing::debug!("stat {} failed, listing as empty file: {}", path.display(), e);
                (false, 0)
            }
        };

        let mut segments = parent_segments.to_vec();
        segments.push(name.clone());

        MediaStat {
            link: format!("{}{}", base_url, path::encode_segments(&segments)),
            size: format_size(bytes),
            bytes,
            name,
            is_dir,
        }
    }

    /// Sum of all file sizes below `dir`. Unreadable entries count as zero.
    fn dir_size<'a>(&'a self, dir: &'a Path, depth: usize) -> BoxFuture<'a, u64> {
        async move {
            if depth == 0 {
                return 0;
            }
            let names = match self.storage.read_dir(dir).await {
                Ok(names) => names,
                Err(e) => {
                    tracing::debug!("cannot read {}: {}", dir.display(), e);
                    return 0;
                }
            };

            let sizes = join_all(names.into_iter().map(|name| async move {
                let child = dir.join(name);
                match self.storage.stat(&child).await {
                    Ok(meta) if meta.is_dir => self.dir_size(&child, depth - 1).await,
                    Ok(meta) => meta.size,
                    Err(_) => 0,
                }
            }))
            .await;

            sizes.into_iter().sum()
        }
        .boxed()
    }
}

/// Directories first, then by name with `_` sorting before letters and digits.
/// Names equal under that ordering fall back to plain ordinal order.
pub fn sort_entries(stats: &mut [MediaStat]) {
    stats.sort_by_cached_key(|s| (!s.is_dir, sort_key(&s.name), s.name.clone()));
}

fn sort_key(name: &str) -> String {
    name.to_lowercase().replace('_', "\u{0}")
}

/// Returns the matching video extension, if supported.
pub fn supported_video_extension(extension: &str) -> Option<&'static str> {
    VIDEO_EXTENSIONS
        .iter()
        .find(|e| e.eq_ignore_ascii_case(extension))
        .copied()
}

/// Returns the matching subtitle extension, if supported.
pub fn supported_subtitle_extension(extension: &str) -> Option<&'static str> {
    SUBTITLE_EXTENSIONS
        .iter()
        .find(|e| e.eq_ignore_ascii_case(extension))
        .copied()
}

/// MIME type for serving a file with the given (lower-case) extension.
pub fn content_type(extension: &str) -> &'static str {
    match extension {
        // Video
        "mp4" | "m4v" => "video/mp4",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "ogv" => "video/ogg",

        // Audio
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",

        // Subtitles
        "vtt" => "text/vtt",
        "srt" => "application/x-subrip",
        "sub" => "text/plain",

        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",

        _ => "application/octet-stream",
    }
}
