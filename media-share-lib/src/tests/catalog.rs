//! Catalog tests against temporary media trees.

use super::fixtures::{media_tree, FailingStat};
use crate::catalog::{ListOptions, MediaCatalog};
use crate::error::MediaError;
use crate::path::MediaRoot;
use crate::storage::EntryType;

fn names(stats: &[crate::catalog::MediaStat]) -> Vec<&str> {
    stats.iter().map(|s| s.name.as_str()).collect()
}

#[tokio::test]
async fn test_list_order() {
    let tree = media_tree(&[("_z", b""), ("A", b""), ("b", b""), ("dir1/", b"")]);
    let catalog = MediaCatalog::local(tree.path());

    let stats = catalog.list_dir("/", "", ListOptions::default()).await.unwrap();
    assert_eq!(names(&stats), vec!["dir1", "_z", "A", "b"]);
    assert!(stats[0].is_dir);
    assert!(stats[1..].iter().all(|s| !s.is_dir));
}

#[tokio::test]
async fn test_list_links_and_sizes() {
    let tree = media_tree(&[
        ("My Movies/clip one.mp4", &[0u8; 1500]),
        ("My Movies/notes.txt", b"hi"),
    ]);
    let catalog = MediaCatalog::local(tree.path());

    let stats = catalog
        .list_dir("My%20Movies", "/media/", ListOptions::default())
        .await
        .unwrap();
    assert_eq!(names(&stats), vec!["clip one.mp4", "notes.txt"]);

    assert_eq!(stats[0].link, "/media/My%20Movies/clip%20one.mp4");
    assert_eq!(stats[0].bytes, 1500);
    assert_eq!(stats[0].size, "1.5 kb");
    assert_eq!(stats[1].size, "2 bytes");
}

#[tokio::test]
async fn test_list_recursive_dir_sizes() {
    let tree = media_tree(&[
        ("season/ep1.mp4", &[0u8; 600]),
        ("season/extras/ep1.srt", &[0u8; 400]),
        ("season/extras/deeper/x", &[0u8; 1000]),
    ]);
    let catalog = MediaCatalog::local(tree.path());

    let stats = catalog
        .list_dir("/", "", ListOptions { dir_sizes: true })
        .await
        .unwrap();
    assert_eq!(stats.len(), 1);
    assert!(stats[0].is_dir);
    assert_eq!(stats[0].bytes, 2000);
    assert_eq!(stats[0].size, "2 kb");

    // Without recursion a directory reports its own (platform) size.
    let plain = catalog.list_dir("/", "", ListOptions::default()).await.unwrap();
    assert_ne!(plain[0].bytes, 2000);
}

#[tokio::test]
async fn test_list_keeps_unstatable_entry() {
    let tree = media_tree(&[("good.mp4", &[0u8; 10]), ("bad.mp4", &[0u8; 10])]);
    let catalog = MediaCatalog::new(MediaRoot::new(tree.path()), FailingStat { name: "bad.mp4" });

    let stats = catalog.list_dir("/", "", ListOptions::default()).await.unwrap();
    assert_eq!(names(&stats), vec!["bad.mp4", "good.mp4"]);
    assert_eq!(stats[0].bytes, 0);
    assert_eq!(stats[0].size, "0 bytes");
    assert!(!stats[0].is_dir);
    assert_eq!(stats[1].bytes, 10);
}

#[tokio::test]
async fn test_dir_sizes_skip_unstatable_child() {
    let tree = media_tree(&[
        ("season/ep1.mp4", &[0u8; 600]),
        ("season/extras/broken.mp4", &[0u8; 400]),
        ("season/extras/ok.srt", &[0u8; 50]),
    ]);
    let catalog = MediaCatalog::new(
        MediaRoot::new(tree.path()),
        FailingStat { name: "broken.mp4" },
    );

    let stats = catalog
        .list_dir("/", "", ListOptions { dir_sizes: true })
        .await
        .unwrap();
    assert_eq!(names(&stats), vec!["season"]);
    assert!(stats[0].is_dir);
    assert_eq!(stats[0].bytes, 650);
}

#[tokio::test]
async fn test_list_errors() {
    let tree = media_tree(&[("movie.mp4", b"x")]);
    let catalog = MediaCatalog::local(tree.path());

    let err = catalog
        .list_dir("movie.mp4", "", ListOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MediaError::WrongType {
            expected: EntryType::Dir,
            found: EntryType::File,
            ..
        }
    ));

    let err = catalog
        .list_dir("nowhere", "", ListOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::NotFound(_)));

    let err = catalog.list_dir("", "", ListOptions::default()).await.unwrap_err();
    assert!(matches!(err, MediaError::InvalidPath(_)));
}

#[tokio::test]
async fn test_get_file() {
    let tree = media_tree(&[("a/movie.mp4", b"moov"), ("a/dir/", b"")]);
    let catalog = MediaCatalog::local(tree.path());

    assert_eq!(catalog.get_file("a/movie.mp4").await.unwrap(), b"moov");
    // Traversal is dropped, not applied.
    assert_eq!(catalog.get_file("../a/./movie.mp4").await.unwrap(), b"moov");

    let err = catalog.get_file("a/dir").await.unwrap_err();
    assert!(matches!(
        err,
        MediaError::WrongType {
            expected: EntryType::File,
            found: EntryType::Dir,
            ..
        }
    ));
    assert!(matches!(
        catalog.get_file("a/missing.mp4").await.unwrap_err(),
        MediaError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_entry_type() {
    let tree = media_tree(&[("a/movie.mp4", b"x")]);
    let catalog = MediaCatalog::local(tree.path());

    assert_eq!(catalog.entry_type("a").await, EntryType::Dir);
    assert_eq!(catalog.entry_type("/a/movie.mp4").await, EntryType::File);
    assert_eq!(catalog.entry_type("a/nope").await, EntryType::Unknown);
    assert_eq!(catalog.entry_type("").await, EntryType::Error);
    // Everything collapses to the root, which is a directory.
    assert_eq!(catalog.entry_type("../..").await, EntryType::Dir);
}

#[tokio::test]
async fn test_listing_serializes() {
    let tree = media_tree(&[("x.mp4", b"abc")]);
    let catalog = MediaCatalog::local(tree.path());
    let stats = catalog.list_dir("/", "", ListOptions::default()).await.unwrap();

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "name": "x.mp4",
            "size": "3 bytes",
            "bytes": 3,
            "link": "/x.mp4",
            "is_dir": false
        }])
    );
}
