use crate::common::command::{
    NOT_WUG, READABLE_COMMIT_DATE, READABLE_ROOT_DATE, assert_twig_silent, find_commit_id,
    init_repository_dir, log_entry, twig_add, twig_commit, twig_output,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_shows_first_parent_history_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "added notwug");

    let expected = [
        log_entry(
            &find_commit_id(dir, "added notwug"),
            READABLE_COMMIT_DATE,
            "added notwug",
        ),
        log_entry(
            &find_commit_id(dir, "added wug"),
            READABLE_COMMIT_DATE,
            "added wug",
        ),
        log_entry(
            &find_commit_id(dir, "initial commit"),
            READABLE_ROOT_DATE,
            "initial commit",
        ),
    ]
    .concat();

    assert_eq!(twig_output(dir, &["log"]), expected);
}

#[rstest]
fn log_only_follows_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    assert_twig_silent(dir, &["branch", "other"]);
    assert_twig_silent(dir, &["checkout", "other"]);
    write_file(FileSpec::new(dir.join("notwug.txt"), NOT_WUG.to_string()));
    twig_add(dir, "notwug.txt");
    twig_commit(dir, "on other");
    assert_twig_silent(dir, &["checkout", "master"]);

    let log = twig_output(dir, &["log"]);
    let global_log = twig_output(dir, &["global-log"]);
    let side_id = find_commit_id(dir, "on other");

    assert!(!log.contains(&side_id));
    assert!(global_log.contains(&side_id));
    assert_eq!(global_log.matches("===\n").count(), 3);
}

#[rstest]
fn global_log_lists_commits_in_id_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let mut ids = vec![
        find_commit_id(dir, "initial commit"),
        find_commit_id(dir, "added wug"),
    ];
    ids.sort();

    let global_log = twig_output(dir, &["global-log"]);
    let listed = global_log
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .collect::<Vec<_>>();

    assert_eq!(listed, ids);
}
