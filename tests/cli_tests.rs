// Tests driving the pkgfront binary against a temporary root folder
//
// Probe commands are plain `sh -c` snippets so the tests run on any Unix
// host without a real package manager.

mod common;

use std::process::{Command, Output};

use common::app_root;

const SHELL_INTERFACE: &str = r#"{
    "exists": { "cmd": "sh", "cmd_args": ["-c", "exit 0"] },
    "installed": { "cmd": "sh", "cmd_args": ["-c", "test \"$0\" = git"] },
    "install": { "cmd": "true" },
    "remove": { "cmd": "sh", "cmd_args": ["-c", "exit 3"] }
}"#;

fn pkgfront(root: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pkgfront"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("pkgfront should start")
}

#[test]
fn test_list_interfaces_prints_sorted_names() {
    let (dir, _paths) = app_root(&[("pacman", "{}"), ("apt", "{}")], &[("base", "{}")]);

    let output = pkgfront(dir.path(), &["list-interfaces"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "apt\npacman\n");

    let output = pkgfront(dir.path(), &["list-package-lists"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "base\n");
}

#[test]
fn test_dry_run_prints_command_and_writes_log() {
    let (dir, paths) = app_root(
        &[("shell", SHELL_INTERFACE)],
        &[("base", r#"{"packages": ["vim", "git"]}"#)],
    );

    let output = pkgfront(dir.path(), &["--dry-run", "install", "-i", "shell", "-l", "base"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("Of the 2 packages that you are trying to install."));
    assert!(stderr.contains("Command that will be executed:"));
    assert!(stderr.contains("Dry run: command not executed"));
    assert!(stderr.contains(&format!("Log file: {}", paths.log_file().display())));

    let log = std::fs::read_to_string(paths.log_file()).expect("log file written");
    assert!(log.contains("Packages processed:\ngit\nvim"));
    assert!(log.contains("Packages to handle:\nvim"));
}

#[test]
fn test_assume_yes_runs_command() {
    let (dir, _paths) = app_root(
        &[("shell", SHELL_INTERFACE)],
        &[("base", r#"{"packages": ["vim"]}"#)],
    );

    let output = pkgfront(dir.path(), &["install", "-i", "shell", "-l", "base", "--yes"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_failed_command_exits_non_zero() {
    let (dir, _paths) = app_root(
        &[("shell", SHELL_INTERFACE)],
        &[("base", r#"{"packages": ["git"]}"#)],
    );

    let output = pkgfront(dir.path(), &["remove", "-i", "shell", "-l", "base", "-y"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_interface_is_configuration_error() {
    let (dir, _paths) = app_root(&[], &[("base", r#"{"packages": ["vim"]}"#)]);

    let output = pkgfront(dir.path(), &["install", "-i", "nope", "-l", "base"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Log file:"));
}

#[test]
fn test_missing_list_option_is_usage_error() {
    let (dir, _paths) = app_root(&[], &[]);

    let output = pkgfront(dir.path(), &["install", "-i", "shell"]);
    assert!(!output.status.success());
}
