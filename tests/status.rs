use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{committed_repository_dir, init_repository_dir, run_kit_command};
use common::file::{FileSpec, write_file};

fn status_of(dir: &std::path::Path) -> String {
    let output = run_kit_command(dir, &["status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("utf8 output")
}

#[rstest]
fn clean_repository_shows_empty_sections(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    let status = status_of(dir.path());

    assert_eq!(
        status,
        "=== Branches ===\n\
         *master\n\
         \n\
         === Staged Files ===\n\
         \n\
         === Removed Files ===\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         \n\
         === Untracked Files ===\n\
         \n"
    );
}

#[rstest]
fn branches_section_stars_the_current_branch(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_kit_command(dir.path(), &["branch", "b1"])
        .assert()
        .success();

    let status = status_of(dir.path());
    assert!(status.contains("=== Branches ===\n*master\nb1\n"));
}

#[rstest]
fn untracked_files_are_listed_sorted(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_file(FileSpec::new(dir.path().join("z.txt"), "z".to_string()));
    write_file(FileSpec::new(dir.path().join("c.txt"), "c".to_string()));

    let status = status_of(dir.path());
    assert!(status.contains("=== Untracked Files ===\nc.txt\nz.txt\n"));
}

#[rstest]
fn tracked_file_edited_without_staging_shows_as_modified(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "edited\n".to_string()));

    let status = status_of(dir.path());
    assert!(status.contains("=== Modifications Not Staged For Commit ===\na.txt (modified)\n"));
}

#[rstest]
fn staged_file_edited_afterwards_shows_as_modified(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "one".to_string()));
    run_kit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("a.txt"), "two".to_string()));

    let status = status_of(dir.path());
    assert!(status.contains("=== Modifications Not Staged For Commit ===\na.txt (modified)\n"));
}

#[rstest]
fn staged_file_deleted_afterwards_shows_as_deleted(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "one".to_string()));
    run_kit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    std::fs::remove_file(dir.path().join("a.txt")).expect("delete");

    let status = status_of(dir.path());
    assert!(status.contains("=== Modifications Not Staged For Commit ===\na.txt (deleted)\n"));
}

#[rstest]
fn tracked_file_deleted_without_rm_shows_as_deleted(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    std::fs::remove_file(dir.path().join("a.txt")).expect("delete");

    let status = status_of(dir.path());
    assert!(status.contains("=== Modifications Not Staged For Commit ===\na.txt (deleted)\n"));
}

#[rstest]
fn file_removed_with_rm_shows_only_under_removed(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_kit_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();

    let status = status_of(dir.path());
    assert!(status.contains("=== Removed Files ===\na.txt\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
}

#[rstest]
fn staged_file_matching_the_working_tree_is_not_modified(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "edited\n".to_string()));
    run_kit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    let status = status_of(dir.path());
    assert!(status.contains("=== Staged Files ===\na.txt\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
}
