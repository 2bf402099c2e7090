use crate::common::command::{
    NOT_WUG, assert_twig_output, assert_twig_silent, init_repository_dir, twig_add, twig_commit,
    twig_output,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_with_staged_changes_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_twig_silent(dir, &["branch", "other"]);
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");

    assert_twig_output(dir, &["merge", "other"], "You have uncommitted changes.\n");
}

#[rstest]
fn merge_with_missing_branch_fails(init_repository_dir: TempDir) {
    assert_twig_output(
        init_repository_dir.path(),
        &["merge", "nowhere"],
        "A branch with that name does not exist.\n",
    );
}

#[rstest]
fn merge_with_itself_fails(init_repository_dir: TempDir) {
    assert_twig_output(
        init_repository_dir.path(),
        &["merge", "master"],
        "Cannot merge a branch with itself.\n",
    );
}

#[rstest]
fn merge_refuses_to_clobber_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_twig_silent(dir, &["branch", "other"]);
    write_file(FileSpec::new(dir.join("master.txt"), "master\n".to_string()));
    twig_add(dir, "master.txt");
    twig_commit(dir, "master side");

    assert_twig_silent(dir, &["checkout", "other"]);
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "other side");
    assert_twig_silent(dir, &["checkout", "master"]);

    write_file(FileSpec::new(dir.join("notwug.txt"), "mine\n".to_string()));
    let log_before = twig_output(dir, &["log"]);

    assert_twig_output(
        dir,
        &["merge", "other"],
        "There is an untracked file in the way; delete it, or add and commit it first.\n",
    );
    assert_eq!(read_file(&dir.join("notwug.txt")), "mine\n");
    assert_eq!(twig_output(dir, &["log"]), log_before);
}
