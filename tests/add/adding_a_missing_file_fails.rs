use crate::common::command::{assert_twig_output, init_repository_dir, status_output, twig_output};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_a_missing_file_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    assert_twig_output(dir, &["add", "missing.txt"], "File does not exist.\n");
    assert_eq!(
        twig_output(dir, &["status"]),
        status_output(&["*master"], &[], &[], &[], &[])
    );
}
