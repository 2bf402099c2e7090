use crate::common::command::{assert_twig_output, init_repository_dir, repository_dir};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn missing_command_is_reported(repository_dir: TempDir) {
    assert_twig_output(repository_dir.path(), &[], "Please enter a command.\n");
}

#[rstest]
fn unknown_command_is_reported(repository_dir: TempDir) {
    assert_twig_output(
        repository_dir.path(),
        &["push"],
        "No command with that name exists.\n",
    );
}

#[rstest]
#[case::add_without_path(&["add"])]
#[case::branch_with_extra_operand(&["branch", "one", "two"])]
#[case::checkout_with_two_targets(&["checkout", "one", "two"])]
#[case::checkout_without_target(&["checkout"])]
#[case::merge_without_branch(&["merge"])]
fn wrong_operands_are_reported(init_repository_dir: TempDir, #[case] args: &[&str]) {
    assert_twig_output(init_repository_dir.path(), args, "Incorrect operands.\n");
}

#[rstest]
#[case::status(&["status"])]
#[case::log(&["log"])]
#[case::add(&["add", "wug.txt"])]
#[case::merge(&["merge", "other"])]
fn commands_need_a_repository(repository_dir: TempDir, #[case] args: &[&str]) {
    assert_twig_output(
        repository_dir.path(),
        args,
        "Not in an initialized twig directory.\n",
    );
}
