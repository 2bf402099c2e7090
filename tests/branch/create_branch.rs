use crate::common::command::{
    NOT_WUG, assert_twig_output, assert_twig_silent, find_commit_id, init_repository_dir,
    status_output, twig_add, twig_commit, twig_output,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn new_branch_points_at_head_without_switching(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    assert_twig_silent(dir, &["branch", "other"]);
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "master moves on");

    assert_eq!(
        twig_output(dir, &["status"]),
        status_output(&["*master", "other"], &[], &[], &[], &[])
    );

    assert_twig_silent(dir, &["checkout", "other"]);
    let log = twig_output(dir, &["log"]);

    assert!(log.starts_with(&format!("===\ncommit {}\n", find_commit_id(dir, "added wug"))));
    assert!(!dir.join("notwug.txt").exists());
}

#[rstest]
fn duplicate_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_twig_silent(dir, &["branch", "other"]);

    assert_twig_output(
        dir,
        &["branch", "other"],
        "A branch with that name already exists.\n",
    );
    assert_twig_output(
        dir,
        &["branch", "master"],
        "A branch with that name already exists.\n",
    );
}

#[rstest]
#[case::dot_prefix(".hidden")]
#[case::double_dot("a..b")]
#[case::lock_suffix("topic.lock")]
#[case::space("with space")]
fn invalid_branch_names_are_rejected(init_repository_dir: TempDir, #[case] name: &str) {
    let output = twig_output(init_repository_dir.path(), &["branch", name]);

    assert!(output.contains("not a valid branch name"), "got {output:?}");
    assert_eq!(
        twig_output(init_repository_dir.path(), &["status"]),
        status_output(&["*master"], &[], &[], &[], &[])
    );
}
