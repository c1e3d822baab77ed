// Drives the compiled binary with piped stdio, so it runs in plain mode.
// HOME points at a scratch directory to keep preferences and logs out of
// the real user dirs.

use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

fn tmr(args: &[&str]) -> (Output, TempDir) {
    let home = tempfile::tempdir().unwrap();
    let output = Command::cargo_bin("tmr")
        .unwrap()
        .env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_STATE_HOME")
        .env_remove("TMR_LOG")
        .args(args)
        .output()
        .unwrap();
    (output, home)
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn no_arguments_fails() {
    let (out, _home) = tmr(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("no arguments given"));
}

#[test]
fn each_parse_error_has_its_own_message() {
    let cases = vec![
        (vec![], "no arguments given"),
        (vec!["--minutes"], "--minutes requires a value"),
        (vec!["--seconds"], "--seconds requires a value"),
        (vec!["--minutes", "abc"], "'abc' is not a valid"),
        (vec!["--minutes", "71582789"], "too long"),
        (vec!["--bogus"], "unknown argument '--bogus'"),
    ];
    for (args, expected) in cases {
        let (out, _home) = tmr(&args);
        assert_eq!(out.status.code(), Some(1), "args {args:?}");
        assert!(
            stderr(&out).contains(expected),
            "args {args:?}: {}",
            stderr(&out)
        );
        assert!(stdout(&out).is_empty());
    }
}

#[test]
fn help_exits_zero() {
    for flag in ["--help", "-h"] {
        let (out, _home) = tmr(&[flag, "--bogus"]);
        assert_eq!(out.status.code(), Some(0));
        let text = stdout(&out);
        assert!(text.contains("--minutes"));
        assert!(text.contains("--seconds"));
    }
}

#[test]
fn reset_is_inert() {
    let (out, _home) = tmr(&["--reset"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("nothing to reset"));
}

#[test]
fn zero_seconds_finishes_immediately() {
    let (out, _home) = tmr(&["-s", "0"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "00:00\n\x07time's up!\n");
}

#[test]
fn one_second_counts_down() {
    let (out, home) = tmr(&["--seconds", "1"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "00:01\n00:00\n\x07time's up!\n");

    let log = home.path().join(".local/state/tmr/tmr.log");
    let log = std::fs::read_to_string(log).unwrap();
    assert!(log.contains("countdown finished"));
}

// preferences live under ~/.config only on Linux
#[cfg(target_os = "linux")]
#[test]
fn bell_can_be_switched_off() {
    let home = tempfile::tempdir().unwrap();
    let prefs = home.path().join(".config/tmr");
    std::fs::create_dir_all(&prefs).unwrap();
    std::fs::write(prefs.join("config.json"), br#"{ "bell": false }"#).unwrap();

    let out = Command::cargo_bin("tmr")
        .unwrap()
        .env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .args(["-s", "0"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "00:00\ntime's up!\n");
}
