use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with `a.txt` and `b.txt` committed on master
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "alpha\n".to_string()));
    write_file(FileSpec::new(dir.path().join("b.txt"), "beta\n".to_string()));

    run_kit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_kit_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    kit_commit(dir.path(), "add a and b").assert().success();

    dir
}

pub fn run_kit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("kit").expect("Failed to find kit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn kit_commit(dir: &Path, message: &str) -> Command {
    run_kit_command(dir, &["commit", message])
}

/// Name of the branch HEAD points at
pub fn head_branch(dir: &Path) -> String {
    let head_content =
        std::fs::read_to_string(dir.join(".kit").join("HEAD")).expect("Failed to read HEAD");

    head_content
        .trim()
        .strip_prefix("ref: refs/heads/")
        .expect("Malformed HEAD")
        .to_string()
}

/// Full commit id a branch points at
pub fn branch_tip(dir: &Path, branch: &str) -> String {
    let branch_path = dir.join(".kit").join("refs").join("heads").join(branch);
    std::fs::read_to_string(branch_path)
        .expect("Failed to read branch file")
        .trim()
        .to_string()
}

/// Full commit id of the current commit
pub fn head_commit_id(dir: &Path) -> String {
    branch_tip(dir, &head_branch(dir))
}
