use crate::common::command::{
    NOT_WUG, WUG, assert_twig_output, assert_twig_silent, find_commit_id, init_repository_dir,
    status_output, twig_add, twig_commit, twig_output,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_restores_snapshot_and_moves_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let target = find_commit_id(dir, "added wug");

    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    write_file(FileSpec::new(dir.join("wug.txt"), "changed\n".to_string()));
    twig_add(dir, "notwug.txt");
    twig_add(dir, "wug.txt");
    twig_commit(dir, "second");
    write_file(FileSpec::new(dir.join("staged.txt"), "staged\n".to_string()));
    twig_add(dir, "staged.txt");

    assert_twig_silent(dir, &["reset", &target[..10]]);

    assert!(!dir.join("notwug.txt").exists());
    assert_eq!(read_file(&dir.join("wug.txt")), WUG);
    assert!(twig_output(dir, &["log"]).starts_with(&format!("===\ncommit {target}\n")));
    assert_eq!(
        twig_output(dir, &["status"]),
        status_output(&["*master"], &[], &[], &[], &["staged.txt"])
    );
}

#[rstest]
fn reset_can_move_a_branch_forward_again(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "second");
    let second = find_commit_id(dir, "second");

    assert_twig_silent(dir, &["reset", &find_commit_id(dir, "added wug")]);
    assert_twig_silent(dir, &["reset", &second]);

    assert_eq!(read_file(&dir.join("notwug.txt")), NOT_WUG);
    assert!(twig_output(dir, &["log"]).starts_with(&format!("===\ncommit {second}\n")));
}

#[rstest]
fn reset_to_unknown_commit_fails(init_repository_dir: TempDir) {
    assert_twig_output(
        init_repository_dir.path(),
        &["reset", "0123456789abcdef"],
        "No commit with that id exists.\n",
    );
}

#[rstest]
fn reset_refuses_to_clobber_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "second");
    let second = find_commit_id(dir, "second");
    assert_twig_silent(dir, &["rm", "notwug.txt"]);
    twig_commit(dir, "third");

    write_file(FileSpec::new(dir.join("notwug.txt"), "mine\n".to_string()));

    assert_twig_output(
        dir,
        &["reset", &second],
        "There is an untracked file in the way; delete it, or add and commit it first.\n",
    );
    assert_eq!(read_file(&dir.join("notwug.txt")), "mine\n");
    assert!(twig_output(dir, &["log"]).starts_with(&format!(
        "===\ncommit {}\n",
        find_commit_id(dir, "third")
    )));
}
