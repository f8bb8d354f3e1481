// tests/status_parse.rs

use std::path::Path;

use cleanrun::fs::mock::MockFileSystem;
use cleanrun::watch::{parse_status, read_status, StatusRead, UNKNOWN_EXIT_CODE};

#[test]
fn integers_are_exit_codes() {
    assert_eq!(parse_status("0"), StatusRead::Exited(0));
    assert_eq!(parse_status("1\n"), StatusRead::Exited(1));
    assert_eq!(parse_status("  143  \n"), StatusRead::Exited(143));
}

#[test]
fn empty_contents_mean_not_finished() {
    assert_eq!(parse_status(""), StatusRead::Pending);
    assert_eq!(parse_status(" \n\t"), StatusRead::Pending);
}

#[test]
fn garbage_resolves_to_the_unknown_sentinel() {
    assert_eq!(parse_status("done"), StatusRead::Exited(UNKNOWN_EXIT_CODE));
    assert_eq!(parse_status("0 1"), StatusRead::Exited(UNKNOWN_EXIT_CODE));
    assert_eq!(UNKNOWN_EXIT_CODE, -1);
}

#[test]
fn unreadable_file_is_pending() {
    let fs = MockFileSystem::new();
    assert_eq!(
        read_status(&fs, Path::new("/tmp/cleanrun_status_missing.txt")),
        StatusRead::Pending
    );
}

#[test]
fn read_status_parses_file_contents() {
    let fs = MockFileSystem::new();
    fs.add_file("/tmp/s.txt", "2\n");
    assert_eq!(read_status(&fs, Path::new("/tmp/s.txt")), StatusRead::Exited(2));
}
