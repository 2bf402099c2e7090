use crate::common::command::{
    NOT_WUG, WUG, assert_twig_output, assert_twig_silent, init_repository_dir, status_output,
    twig_add, twig_commit, twig_output,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn removing_a_tracked_file_deletes_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    assert_twig_silent(dir, &["rm", "wug.txt"]);

    assert!(!dir.join("wug.txt").exists());
    assert_eq!(
        twig_output(dir, &["status"]),
        status_output(&["*master"], &[], &["wug.txt"], &[], &[])
    );
}

#[rstest]
fn removing_a_staged_file_only_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");

    assert_twig_silent(dir, &["rm", "notwug.txt"]);

    assert_eq!(read_file(&dir.join("notwug.txt")), NOT_WUG);
    assert_eq!(
        twig_output(dir, &["status"]),
        status_output(&["*master"], &[], &[], &[], &["notwug.txt"])
    );
}

#[rstest]
fn removing_an_untracked_file_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));

    assert_twig_output(dir, &["rm", "notwug.txt"], "No reason to remove the file.\n");
    assert_eq!(read_file(&dir.join("notwug.txt")), NOT_WUG);
}

#[rstest]
fn committed_removal_stops_tracking(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    assert_twig_silent(dir, &["rm", "wug.txt"]);
    twig_commit(dir, "removed wug");

    assert_twig_output(
        dir,
        &["checkout", "--", "wug.txt"],
        "File does not exist in that commit.\n",
    );

    write_file(FileSpec::new(dir.join("wug.txt"), WUG.to_string()));
    assert_eq!(
        twig_output(dir, &["status"]),
        status_output(&["*master"], &[], &[], &[], &["wug.txt"])
    );
}
