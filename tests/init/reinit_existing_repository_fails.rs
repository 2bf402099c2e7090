use crate::common::command::{assert_twig_output, init_repository_dir, twig_output};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reinit_keeps_existing_history(init_repository_dir: TempDir) {
    let log_before = twig_output(init_repository_dir.path(), &["log"]);

    assert_twig_output(
        init_repository_dir.path(),
        &["init"],
        "A twig version-control system already exists in the current directory.\n",
    );

    assert_eq!(twig_output(init_repository_dir.path(), &["log"]), log_before);
}
