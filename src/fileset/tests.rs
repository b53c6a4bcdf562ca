//! Tests for candidate file collection.

use super::*;
use std::fs::{self, File};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("nested/deep")).unwrap();
    for name in [
        "one.txt",
        "two.rs",
        "nested/three.txt",
        "nested/deep/four.rs",
        ".hidden.txt",
    ] {
        fs::write(dir.path().join(name), "content\n").unwrap();
    }
    dir
}

#[test]
fn empty_filter_collects_every_file_at_any_depth() {
    let dir = fixture();
    let files = collect_files(dir.path(), "").unwrap();
    assert_eq!(files.len(), 5);
    assert!(files.iter().all(|p| p.is_file()));
}

#[test]
fn hidden_files_are_included() {
    let dir = fixture();
    let files = collect_files(dir.path(), "").unwrap();
    assert!(
        files
            .iter()
            .any(|p| p.file_name().unwrap() == ".hidden.txt")
    );
}

#[test]
fn star_does_not_cross_directories() {
    let dir = fixture();
    let files = collect_files(dir.path(), "*.txt").unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert!(names.contains(&"one.txt".into()));
    assert!(!names.iter().any(|p| p.starts_with("nested")));
}

#[test]
fn recursive_glob_filters_by_extension() {
    let dir = fixture();
    let files = collect_files(dir.path(), "**/*.rs").unwrap();
    assert_eq!(files.len(), 2);
    assert!(
        files
            .iter()
            .all(|p| p.extension().unwrap_or_default() == "rs")
    );
}

#[test]
fn directories_are_never_candidates() {
    let dir = fixture();
    let files = collect_files(dir.path(), "**/*").unwrap();
    assert!(!files.iter().any(|p| p.ends_with("nested")));
}

#[test]
fn newest_modification_time_comes_first() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join("old.txt");
    let new = dir.path().join("new.txt");
    fs::write(&old, "old").unwrap();
    fs::write(&new, "new").unwrap();

    let base = SystemTime::now() - Duration::from_secs(3600);
    File::options()
        .write(true)
        .open(&old)
        .unwrap()
        .set_modified(base)
        .unwrap();
    File::options()
        .write(true)
        .open(&new)
        .unwrap()
        .set_modified(base + Duration::from_secs(60))
        .unwrap();

    let files = collect_files(dir.path(), "").unwrap();
    assert_eq!(files, vec![new, old]);
}

#[test]
fn malformed_glob_is_rejected() {
    let dir = fixture();
    let err = collect_files(dir.path(), "a{b").unwrap_err();
    assert_eq!(err.kind(), "invalid_pattern");
}

#[test]
fn missing_base_yields_an_empty_list() {
    let dir = TempDir::new().unwrap();
    let files = collect_files(&dir.path().join("gone"), "").unwrap();
    assert!(files.is_empty());
}
