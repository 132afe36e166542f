//! Drive `ComposerCli` against a shell script standing in for composer.
#![cfg(unix)]

use camino::{Utf8Path, Utf8PathBuf};
use devbranch_composer::{ComposerCli, DependencyLister, ProcessError};
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

fn write_script(dir: &Utf8Path, body: &str) -> Utf8PathBuf {
    let path = dir.join("composer");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perms = std::fs::metadata(&path).expect("metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod");
    path
}

fn setup() -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");
    (temp, root)
}

#[test]
fn returns_stdout_on_success() {
    let (_temp, root) = setup();
    let script = write_script(&root, r#"echo '{"installed": []}'"#);

    let raw = ComposerCli::new(script)
        .list_dependencies(&root)
        .expect("listing");
    assert_eq!(raw, b"{\"installed\": []}\n");
}

#[test]
fn passes_working_dir_and_json_format() {
    let (_temp, root) = setup();
    let script = write_script(&root, r#"printf '%s\n' "$@""#);

    let raw = ComposerCli::new(script)
        .list_dependencies(&root)
        .expect("listing");
    let raw = String::from_utf8(raw).expect("utf8 args");
    let args: Vec<&str> = raw.lines().collect();
    assert_eq!(
        args,
        vec![
            "show".to_string(),
            format!("--working-dir={root}"),
            "--format=json".to_string()
        ]
    );
}

#[test]
fn non_zero_exit_carries_tool_output() {
    let (_temp, root) = setup();
    let script = write_script(
        &root,
        "echo 'partial output'\necho 'Composer could not find a composer.json file' >&2\nexit 1",
    );

    let err = ComposerCli::new(script)
        .list_dependencies(&root)
        .expect_err("must fail");
    match &err {
        ProcessError::Failed { status, .. } => assert_eq!(*status, Some(1)),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.diagnostic(),
        "partial output\nComposer could not find a composer.json file"
    );
}

#[test]
fn silent_failure_reports_exit_status() {
    let (_temp, root) = setup();
    let script = write_script(&root, "exit 3");

    let err = ComposerCli::new(script)
        .list_dependencies(&root)
        .expect_err("must fail");
    assert!(err.diagnostic().ends_with("exited with status 3"));
}

#[test]
fn stdout_bytes_are_passed_through_undecoded() {
    let (_temp, root) = setup();
    let script = write_script(&root, r#"printf 'a/\377pkg'"#);

    let raw = ComposerCli::new(script)
        .list_dependencies(&root)
        .expect("listing");
    assert_eq!(raw, b"a/\xffpkg");
}
