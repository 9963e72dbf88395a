//! Secure path resolution
//!
//! Every path that arrives from a request is untrusted. It is split on `/`
//! and `\`, percent-decoded, split again, and stripped of empty, `.` and `..`
//! segments. What is left can only ever name something below the media root.
//!
//! The filtering is purely lexical: `..` is dropped, never applied, so
//! `a/../../etc` becomes `a/etc`.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Facts derived from a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    /// On-disk location, always below the media root.
    pub media_path: PathBuf,
    /// Secure path without its last segment, segments joined with `/`.
    pub parent: String,
    /// Last segment, empty for the root.
    pub name: String,
    /// Lower-cased suffix after the last `.` of `name`, or empty.
    pub extension: String,
}

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathLink {
    pub name: String,
    pub link: String,
}

/// Name of the synthetic first breadcrumb.
pub const ROOT_LINK_NAME: &str = "/";

/// The directory all resolved paths are confined to.
#[derive(Debug, Clone)]
pub struct MediaRoot {
    root: PathBuf,
}

impl MediaRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an untrusted path to its on-disk location.
    pub fn secure_path(&self, insecure_path: &str) -> PathBuf {
        join_under(&self.root, &resolve_segments(insecure_path, None))
    }

    /// Resolve an untrusted path and split it into parent, name and extension.
    pub fn parse_path(&self, insecure_path: &str) -> ParsedPath {
        let mut segments = resolve_segments(insecure_path, None);
        let media_path = join_under(&self.root, &segments);
        let name = segments.pop().unwrap_or_default();
        let extension = extension_of(&name);

        ParsedPath {
            media_path,
            parent: segments.join("/"),
            name,
            extension,
        }
    }
}

/// Split an untrusted path into safe segments, with the optional prefix's
/// segments in front.
pub fn resolve_segments(insecure_path: &str, insecure_prefix: Option<&str>) -> Vec<String> {
    let mut segments = insecure_prefix.map(split_segments).unwrap_or_default();
    segments.extend(split_segments(insecure_path));
    segments
}

/// Absolute, percent-encoded URL path for an untrusted path.
pub fn secure_url(insecure_path: &str, insecure_prefix: Option<&str>) -> String {
    encode_segments(&resolve_segments(insecure_path, insecure_prefix))
}

/// Breadcrumbs for an untrusted path: a root entry, then one entry per
/// segment linking to everything up to and including it.
pub fn path_links(insecure_path: &str, insecure_prefix: Option<&str>) -> Vec<PathLink> {
    let prefix = insecure_prefix.map(split_segments).unwrap_or_default();
    let segments = split_segments(insecure_path);

    let mut links = Vec::with_capacity(segments.len() + 1);
    links.push(PathLink {
        name: ROOT_LINK_NAME.to_string(),
        link: encode_segments(&prefix),
    });

    let mut current = prefix;
    for segment in segments {
        current.push(segment.clone());
        links.push(PathLink {
            name: segment,
            link: encode_segments(&current),
        });
    }
    links
}

/// Lower-cased last dot-separated token of `name`, if it has at least two.
pub fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

fn split_segments(path: &str) -> Vec<String> {
    path.split(is_separator)
        .filter(|token| !token.is_empty())
        .flat_map(|token| {
            // A decoded %2F must not become structure: split once more.
            let decoded = urlencoding::decode_binary(token.as_bytes());
            let decoded = String::from_utf8_lossy(&decoded).into_owned();
            let parts: Vec<String> = decoded.split(is_separator).map(str::to_string).collect();
            parts
        })
        .filter(|segment| is_safe_segment(segment))
        .collect()
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".."
}

fn join_under(root: &Path, segments: &[String]) -> PathBuf {
    segments
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

pub(crate) fn encode_segments(segments: &[String]) -> String {
    let encoded: Vec<_> = segments
        .iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    format!("/{}", encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Component;

    fn root() -> MediaRoot {
        MediaRoot::new("/srv/media")
    }

    #[test]
    fn test_resolve_drops_dot_segments() {
        assert_eq!(resolve_segments("a/../../etc", None), vec!["a", "etc"]);
        assert_eq!(resolve_segments("./a//b/.", None), vec!["a", "b"]);
        assert_eq!(resolve_segments("", None), Vec::<String>::new());
        assert_eq!(resolve_segments("/", None), Vec::<String>::new());
    }

    #[test]
    fn test_resolve_backslashes() {
        assert_eq!(
            resolve_segments("a\\..\\..\\windows\\\\system32", None),
            vec!["a", "windows", "system32"]
        );
    }

    #[test]
    fn test_resolve_decodes_once() {
        assert_eq!(resolve_segments("My%20Movies/a%2Bb", None), vec!["My Movies", "a+b"]);
        assert_eq!(resolve_segments("%2e%2e/%2E/x", None), vec!["x"]);
        // Encoded separators are split again and re-filtered.
        assert_eq!(resolve_segments("a%2F..%2F..%5Cetc", None), vec!["a", "etc"]);
    }

    #[test]
    fn test_resolve_double_encoding_stays_literal() {
        assert_eq!(resolve_segments("%252e%252e/etc", None), vec!["%2e%2e", "etc"]);
    }

    #[test]
    fn test_resolve_with_prefix() {
        assert_eq!(
            resolve_segments("movies/a.mp4", Some("/proxy/../base/")),
            vec!["proxy", "base", "movies", "a.mp4"]
        );
    }

    #[test]
    fn test_media_path_never_escapes_root() {
        let inputs = [
            "..",
            "../..",
            "/../../../etc/passwd",
            "a/./../b/../..",
            "\\..\\..\\",
            "%2e%2e%2f%2e%2e%2fetc",
            "....//....//",
            "",
            ".",
        ];
        for input in inputs {
            let path = root().secure_path(input);
            assert!(path.starts_with("/srv/media"), "{input:?} -> {path:?}");
            assert!(
                !path.components().any(|c| matches!(c, Component::ParentDir | Component::CurDir)),
                "{input:?} -> {path:?}"
            );
        }
    }

    #[test]
    fn test_parse_path() {
        let parsed = root().parse_path("a/b/c.EXT");
        assert_eq!(parsed.media_path, PathBuf::from("/srv/media/a/b/c.EXT"));
        assert_eq!(parsed.parent, "a/b");
        assert_eq!(parsed.name, "c.EXT");
        assert_eq!(parsed.extension, "ext");

        assert_eq!(root().parse_path("a/b/c").extension, "");
        assert_eq!(root().parse_path("a/movie.tar.gz").extension, "gz");
    }

    #[test]
    fn test_parse_empty_path() {
        let parsed = root().parse_path("");
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.parent, "");
        assert_eq!(parsed.extension, "");
        assert_eq!(parsed.media_path, PathBuf::from("/srv/media"));
    }

    #[test]
    fn test_secure_url() {
        assert_eq!(secure_url("", None), "/");
        assert_eq!(secure_url("My Movies/../x y.mp4", None), "/My%20Movies/x%20y.mp4");
        assert_eq!(secure_url("a", Some("media")), "/media/a");
    }

    #[test]
    fn test_path_links() {
        let links = path_links("tv/Show Name/s01", Some("base"));
        let names: Vec<_> = links.iter().map(|l| l.name.as_str()).collect();
        let hrefs: Vec<_> = links.iter().map(|l| l.link.as_str()).collect();
        assert_eq!(names, vec!["/", "tv", "Show Name", "s01"]);
        assert_eq!(
            hrefs,
            vec!["/base", "/base/tv", "/base/tv/Show%20Name", "/base/tv/Show%20Name/s01"]
        );
    }

    #[test]
    fn test_path_links_root_only() {
        let links = path_links("/", None);
        assert_eq!(links, vec![PathLink { name: "/".into(), link: "/".into() }]);
    }
}
