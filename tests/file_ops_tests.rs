//! End-to-end file operation flows against a temporary workspace.

use tempfile::TempDir;
use workroom::WorkspaceRoot;
use workroom::edit::{delete_path, edit_file, move_path, write_file};
use workroom::traverse::{glob_files, list_directory};
use workroom::view::{ViewOptions, read_file};

fn workspace() -> (TempDir, WorkspaceRoot) {
    let dir = TempDir::new().unwrap();
    let root = WorkspaceRoot::new(dir.path()).unwrap();
    (dir, root)
}

#[test]
fn write_read_edit_round_trip() {
    let (_dir, root) = workspace();
    write_file(&root, "src/app.py", "def main():\n    pass\n").unwrap();

    let out = read_file(&root, "src/app.py", &ViewOptions::default()).unwrap();
    assert_eq!(
        out,
        "     1\u{2192}def main():\n     2\u{2192}    pass\n"
    );

    edit_file(&root, "src/app.py", "pass", "return 0", false).unwrap();
    let out = read_file(&root, "src/app.py", &ViewOptions {
        offset: 2,
        limit: 1,
    })
    .unwrap();
    assert_eq!(out, "     2\u{2192}    return 0\n");
}

#[test]
fn glob_and_ls_see_written_files() {
    let (_dir, root) = workspace();
    write_file(&root, "a.py", "x = 1\n").unwrap();
    write_file(&root, "lib/b.py", "y = 2\n").unwrap();
    write_file(&root, "lib/c.txt", "notes\n").unwrap();

    let mut files = glob_files(&root, "**/*.py", "").unwrap();
    files.sort_unstable();
    assert_eq!(files, vec!["a.py", "lib/b.py"]);

    let listing = list_directory(&root, "lib").unwrap();
    let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["b.py", "c.txt"]);
}

#[test]
fn move_then_delete_cleans_up() {
    let (dir, root) = workspace();
    write_file(&root, "scratch.txt", "tmp\n").unwrap();
    move_path(&root, "scratch.txt", "archive/kept.txt").unwrap();
    assert!(dir.path().join("archive/kept.txt").is_file());

    delete_path(&root, "archive").unwrap();
    assert!(!dir.path().join("archive").exists());
}

#[test]
fn every_operation_rejects_escaping_paths() {
    let (_dir, root) = workspace();
    write_file(&root, "inside.txt", "x\n").unwrap();

    let escape = "../../etc/passwd";
    assert_eq!(
        read_file(&root, escape, &ViewOptions::default())
            .unwrap_err()
            .kind(),
        "out_of_bounds_path"
    );
    assert_eq!(
        write_file(&root, escape, "no").unwrap_err().kind(),
        "out_of_bounds_path"
    );
    assert_eq!(
        edit_file(&root, escape, "a", "b", false).unwrap_err().kind(),
        "out_of_bounds_path"
    );
    assert_eq!(
        delete_path(&root, escape).unwrap_err().kind(),
        "out_of_bounds_path"
    );
    assert_eq!(
        move_path(&root, "inside.txt", escape).unwrap_err().kind(),
        "out_of_bounds_path"
    );
    assert_eq!(
        glob_files(&root, "*", "..").unwrap_err().kind(),
        "out_of_bounds_path"
    );
    assert_eq!(
        list_directory(&root, "..").unwrap_err().kind(),
        "out_of_bounds_path"
    );
}

#[test]
fn absolute_looking_paths_stay_inside_the_workspace() {
    let (dir, root) = workspace();
    write_file(&root, "/etc/hosts", "127.0.0.1 localhost\n").unwrap();
    assert!(dir.path().join("etc/hosts").is_file());

    let out = read_file(&root, "/etc/hosts", &ViewOptions::default()).unwrap();
    assert!(out.contains("127.0.0.1 localhost"));
}
