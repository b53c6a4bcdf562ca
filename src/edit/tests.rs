//! Tests for mutating file operations.

use super::*;
use std::fs;
use tempfile::TempDir;

fn workspace() -> (TempDir, WorkspaceRoot) {
    let dir = TempDir::new().unwrap();
    let root = WorkspaceRoot::new(dir.path()).unwrap();
    (dir, root)
}

#[test]
fn write_creates_parent_directories() {
    let (dir, root) = workspace();
    write_file(&root, "deep/nested/file.txt", "hello\n").unwrap();
    let written = fs::read_to_string(dir.path().join("deep/nested/file.txt")).unwrap();
    assert_eq!(written, "hello\n");
}

#[test]
fn write_overwrites_existing_content() {
    let (dir, root) = workspace();
    write_file(&root, "f.txt", "first").unwrap();
    write_file(&root, "f.txt", "second").unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("f.txt")).unwrap(), "second");
}

#[test]
fn write_outside_the_root_is_rejected() {
    let (_dir, root) = workspace();
    let err = write_file(&root, "../escape.txt", "nope").unwrap_err();
    assert_eq!(err.kind(), "out_of_bounds_path");
}

#[test]
fn edit_replaces_a_unique_occurrence() {
    let (dir, root) = workspace();
    write_file(&root, "f.txt", "let x = 1;\nlet y = 2;\n").unwrap();
    let replaced = edit_file(&root, "f.txt", "x = 1", "x = 10", false).unwrap();
    assert_eq!(replaced, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("f.txt")).unwrap(),
        "let x = 10;\nlet y = 2;\n"
    );
}

#[test]
fn edit_rejects_a_missing_old_string() {
    let (_dir, root) = workspace();
    write_file(&root, "f.txt", "content\n").unwrap();
    let err = edit_file(&root, "f.txt", "absent", "new", false).unwrap_err();
    assert_eq!(err.kind(), "edit_conflict");
}

#[test]
fn edit_rejects_ambiguous_occurrences() {
    let (_dir, root) = workspace();
    write_file(&root, "f.txt", "dup\ndup\ndup\n").unwrap();
    let err = edit_file(&root, "f.txt", "dup", "x", false).unwrap_err();
    assert_eq!(err.kind(), "edit_conflict");
    assert!(err.to_string().contains("3 locations"));
}

#[test]
fn edit_replace_all_reports_the_count() {
    let (dir, root) = workspace();
    write_file(&root, "f.txt", "dup\ndup\ndup\n").unwrap();
    let replaced = edit_file(&root, "f.txt", "dup", "uniq", true).unwrap();
    assert_eq!(replaced, 3);
    assert_eq!(
        fs::read_to_string(dir.path().join("f.txt")).unwrap(),
        "uniq\nuniq\nuniq\n"
    );
}

#[test]
fn edit_missing_file_is_not_found() {
    let (_dir, root) = workspace();
    let err = edit_file(&root, "gone.txt", "a", "b", false).unwrap_err();
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn delete_removes_a_file() {
    let (dir, root) = workspace();
    write_file(&root, "f.txt", "x").unwrap();
    delete_path(&root, "f.txt").unwrap();
    assert!(!dir.path().join("f.txt").exists());
}

#[test]
fn delete_removes_a_directory_recursively() {
    let (dir, root) = workspace();
    write_file(&root, "sub/a.txt", "x").unwrap();
    write_file(&root, "sub/deep/b.txt", "y").unwrap();
    delete_path(&root, "sub").unwrap();
    assert!(!dir.path().join("sub").exists());
}

#[test]
fn delete_missing_target_is_not_found() {
    let (_dir, root) = workspace();
    let err = delete_path(&root, "nothing").unwrap_err();
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn move_renames_within_the_workspace() {
    let (dir, root) = workspace();
    write_file(&root, "old.txt", "payload").unwrap();
    move_path(&root, "old.txt", "archive/new.txt").unwrap();
    assert!(!dir.path().join("old.txt").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("archive/new.txt")).unwrap(),
        "payload"
    );
}

#[test]
fn move_missing_source_is_not_found() {
    let (_dir, root) = workspace();
    let err = move_path(&root, "gone", "elsewhere").unwrap_err();
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn move_cannot_escape_through_the_destination() {
    let (_dir, root) = workspace();
    write_file(&root, "f.txt", "x").unwrap();
    let err = move_path(&root, "f.txt", "../../stolen.txt").unwrap_err();
    assert_eq!(err.kind(), "out_of_bounds_path");
}
