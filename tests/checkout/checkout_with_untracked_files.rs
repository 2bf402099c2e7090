use crate::common::command::{
    NOT_WUG, assert_twig_output, assert_twig_silent, init_repository_dir, twig_add, twig_commit,
    twig_output,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

const UNTRACKED_IN_THE_WAY: &str =
    "There is an untracked file in the way; delete it, or add and commit it first.\n";

#[rstest]
fn untracked_file_blocks_branch_switch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_twig_silent(dir, &["branch", "other"]);
    assert_twig_silent(dir, &["checkout", "other"]);
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "added notwug");
    assert_twig_silent(dir, &["checkout", "master"]);

    write_file(FileSpec::new(dir.join("notwug.txt"), "mine\n".to_string()));
    let status_before = twig_output(dir, &["status"]);

    assert_twig_output(dir, &["checkout", "other"], UNTRACKED_IN_THE_WAY);

    assert_eq!(read_file(&dir.join("notwug.txt")), "mine\n");
    assert_eq!(twig_output(dir, &["status"]), status_before);
}

#[rstest]
fn untracked_file_blocks_a_directory_in_its_place(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_twig_silent(dir, &["branch", "other"]);
    assert_twig_silent(dir, &["checkout", "other"]);
    write_file(FileSpec::new(dir.join("docs").join("a.txt"), "a\n".to_string()));
    twig_add(dir, "docs/a.txt");
    twig_commit(dir, "added docs");
    assert_twig_silent(dir, &["checkout", "master"]);

    write_file(FileSpec::new(dir.join("docs"), "not a directory\n".to_string()));

    assert_twig_output(dir, &["checkout", "other"], UNTRACKED_IN_THE_WAY);
    assert_eq!(read_file(&dir.join("docs")), "not a directory\n");
}

#[rstest]
fn untracked_file_with_identical_content_does_not_block(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_twig_silent(dir, &["branch", "other"]);
    assert_twig_silent(dir, &["checkout", "other"]);
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "added notwug");
    assert_twig_silent(dir, &["checkout", "master"]);

    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));

    assert_twig_silent(dir, &["checkout", "other"]);
    assert_eq!(read_file(&dir.join("notwug.txt")), NOT_WUG);
}
