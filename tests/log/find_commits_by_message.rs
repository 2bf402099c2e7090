use crate::common::command::{
    NOT_WUG, assert_twig_output, assert_twig_silent, init_repository_dir, twig_add, twig_commit,
    twig_output,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn find_prints_every_matching_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    assert_twig_silent(dir, &["branch", "other"]);
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "same message");

    assert_twig_silent(dir, &["checkout", "other"]);
    write_file(FileSpec::new(dir.join("other.txt"), "other\n".to_string()));
    twig_add(dir, "other.txt");
    twig_commit(dir, "same message");

    let output = twig_output(dir, &["find", "same message"]);
    let ids = output.lines().collect::<Vec<_>>();
    let mut sorted = ids.clone();
    sorted.sort();

    assert_eq!(ids.len(), 2);
    assert_eq!(ids, sorted);
}

#[rstest]
fn find_matches_the_whole_message(init_repository_dir: TempDir) {
    assert_twig_output(
        init_repository_dir.path(),
        &["find", "added"],
        "Found no commit with that message.\n",
    );
}
