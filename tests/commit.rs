use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{
    committed_repository_dir, head_commit_id, init_repository_dir, kit_commit, run_kit_command,
};
use common::file::{FileSpec, write_file};

#[rstest]
fn commit_advances_the_current_branch(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let first_commit = head_commit_id(dir.path());

    write_file(FileSpec::new(dir.path().join("c.txt"), "gamma\n".to_string()));
    run_kit_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();
    kit_commit(dir.path(), "add c").assert().success();

    assert_ne!(head_commit_id(dir.path()), first_commit);
}

#[rstest]
fn commit_with_a_blank_message_fails(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    write_file(FileSpec::new(dir.path().join("c.txt"), "gamma\n".to_string()));
    run_kit_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();

    kit_commit(dir.path(), "  ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a commit message."));
}

#[rstest]
fn commit_with_an_empty_staging_area_fails(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    kit_commit(dir.path(), "nothing staged")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));
}

#[rstest]
fn commit_clears_the_staging_area(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "alpha\n".to_string()));
    run_kit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    kit_commit(dir.path(), "add a").assert().success();

    let index_content =
        std::fs::read_to_string(dir.path().join(".kit").join("index")).expect("index");
    assert_eq!(index_content, "");
}

#[rstest]
fn commit_snapshot_overlays_staged_changes_on_the_parent(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    // change a.txt, remove b.txt, add c.txt
    write_file(FileSpec::new(dir.path().join("a.txt"), "alpha v2\n".to_string()));
    write_file(FileSpec::new(dir.path().join("c.txt"), "gamma\n".to_string()));
    run_kit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_kit_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();
    run_kit_command(dir.path(), &["rm", "b.txt"])
        .assert()
        .success();
    kit_commit(dir.path(), "rework").assert().success();

    // the new snapshot reflects all three staged operations
    run_kit_command(dir.path(), &["checkout", "--", "a.txt"])
        .assert()
        .success();
    assert_eq!(common::file::read_file(&dir.path().join("a.txt")), "alpha v2\n");

    run_kit_command(dir.path(), &["checkout", "--", "c.txt"])
        .assert()
        .success();

    run_kit_command(dir.path(), &["checkout", "--", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist in that commit."));
}
