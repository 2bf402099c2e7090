use crate::common::command::{
    NOT_WUG, assert_twig_output, assert_twig_silent, find_commit_id, init_repository_dir,
    status_output, twig_add, twig_commit, twig_output,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merging_an_ancestor_changes_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_twig_silent(dir, &["branch", "other"]);
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "ahead of other");
    let log_before = twig_output(dir, &["log"]);

    assert_twig_output(
        dir,
        &["merge", "other"],
        "Given branch is an ancestor of the current branch.\n",
    );
    assert_eq!(twig_output(dir, &["log"]), log_before);
}

#[rstest]
fn merging_a_descendant_fast_forwards(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_twig_silent(dir, &["branch", "other"]);
    assert_twig_silent(dir, &["checkout", "other"]);
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "ahead of master");
    assert_twig_silent(dir, &["checkout", "master"]);

    assert_twig_output(dir, &["merge", "other"], "Current branch fast-forwarded.\n");

    assert_eq!(read_file(&dir.join("notwug.txt")), NOT_WUG);
    assert!(twig_output(dir, &["log"]).starts_with(&format!(
        "===\ncommit {}\n",
        find_commit_id(dir, "ahead of master")
    )));
    assert_eq!(
        twig_output(dir, &["status"]),
        status_output(&["*master", "other"], &[], &[], &[], &[])
    );
}

#[rstest]
fn merging_a_branch_at_the_same_commit_is_a_no_op(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_twig_silent(dir, &["branch", "same"]);

    assert_twig_output(
        dir,
        &["merge", "same"],
        "Given branch is an ancestor of the current branch.\n",
    );
}
