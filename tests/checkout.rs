use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{committed_repository_dir, head_branch, head_commit_id, kit_commit, run_kit_command};
use common::file::{FileSpec, read_file, write_file};

#[rstest]
fn checkout_file_restores_the_committed_content(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "scribbles\n".to_string()));

    run_kit_command(dir.path(), &["checkout", "--", "a.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.path().join("a.txt")), "alpha\n");
}

#[rstest]
fn checkout_file_from_an_earlier_commit(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let first_commit = head_commit_id(dir.path());

    write_file(FileSpec::new(dir.path().join("a.txt"), "alpha v2\n".to_string()));
    run_kit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    kit_commit(dir.path(), "rework a").assert().success();

    run_kit_command(dir.path(), &["checkout", &first_commit, "--", "a.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.path().join("a.txt")), "alpha\n");
}

#[rstest]
fn checkout_file_accepts_a_six_character_abbreviation(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let abbreviated = head_commit_id(dir.path())[..6].to_string();

    run_kit_command(dir.path(), &["checkout", &abbreviated, "--", "a.txt"])
        .assert()
        .success();
}

#[rstest]
fn checkout_file_rejects_other_abbreviation_lengths(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let abbreviated = head_commit_id(dir.path())[..8].to_string();

    run_kit_command(dir.path(), &["checkout", &abbreviated, "--", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
fn checkout_of_a_file_absent_from_the_commit_fails(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_kit_command(dir.path(), &["checkout", "--", "ghost.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist in that commit."));
}

#[rstest]
fn checkout_branch_reconciles_the_working_tree(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_kit_command(dir.path(), &["branch", "b1"])
        .assert()
        .success();

    // advance master with a new file and a modification
    write_file(FileSpec::new(dir.path().join("a.txt"), "alpha v2\n".to_string()));
    write_file(FileSpec::new(dir.path().join("c.txt"), "gamma\n".to_string()));
    run_kit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_kit_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();
    kit_commit(dir.path(), "advance master").assert().success();

    run_kit_command(dir.path(), &["checkout", "b1"])
        .assert()
        .success();

    assert_eq!(head_branch(dir.path()), "b1");
    assert_eq!(read_file(&dir.path().join("a.txt")), "alpha\n");
    // c.txt is tracked only by master's tip, so it is gone
    assert!(!dir.path().join("c.txt").exists());
}

#[rstest]
fn checkout_branch_refuses_to_overwrite_an_untracked_file(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_kit_command(dir.path(), &["branch", "b1"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("c.txt"), "gamma\n".to_string()));
    run_kit_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();
    kit_commit(dir.path(), "track c on master").assert().success();

    run_kit_command(dir.path(), &["checkout", "b1"])
        .assert()
        .success();

    // an untracked c.txt now sits where master's checkout would write it
    write_file(FileSpec::new(dir.path().join("c.txt"), "local\n".to_string()));

    run_kit_command(dir.path(), &["checkout", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    // nothing was touched
    assert_eq!(read_file(&dir.path().join("c.txt")), "local\n");
    assert_eq!(head_branch(dir.path()), "b1");
}

#[rstest]
fn checkout_of_the_current_branch_fails(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_kit_command(dir.path(), &["checkout", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No need to checkout the current branch."));
}

#[rstest]
fn checkout_of_an_unknown_branch_fails(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_kit_command(dir.path(), &["checkout", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such branch exists."));
}

#[rstest]
fn checkout_without_operands_fails(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_kit_command(dir.path(), &["checkout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect operands."));
}

#[rstest]
fn checkout_round_trip_leaves_a_clean_status(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_kit_command(dir.path(), &["branch", "b1"])
        .assert()
        .success();
    run_kit_command(dir.path(), &["checkout", "b1"])
        .assert()
        .success();

    let output = run_kit_command(dir.path(), &["status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let status = String::from_utf8(output).expect("utf8 output");

    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));
}
