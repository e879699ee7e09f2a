use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run(dir: &Path, args: &[&str]) -> Output {
    // an empty config keeps the user's own wikiblog.toml out of the way
    let cfg = dir.join("wikiblog.toml");
    if !cfg.exists() {
        fs::write(&cfg, "").unwrap();
    }

    Command::new(env!("CARGO_BIN_EXE_wikiblog"))
        .current_dir(dir)
        .arg("--config-path")
        .arg(&cfg)
        .args(args)
        .output()
        .expect("run wikiblog")
}

#[test]
fn missing_root_fails_without_output() {
    let tmp = TempDir::new().unwrap();

    let out = run(tmp.path(), &[]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Expected wiki repo checked out at"), "stderr={}", stderr);
    assert!(!tmp.path().join("README.md").exists());
}

#[test]
fn writes_and_reports_summary() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("wiki").join("self")).unwrap();
    fs::write(tmp.path().join("wiki").join("self").join("travel.md"), "# Travel\n**2024-06-01**\n").unwrap();

    let out = run(tmp.path(), &[]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Found 1 blog posts. Updated README.md."), "stdout={}", stdout);

    let readme = fs::read_to_string(tmp.path().join("README.md")).unwrap();
    assert!(readme.contains("- [Travel](https://8hantanu.net/wiki/self/travel)"));

    let out = run(tmp.path(), &["--check"]);
    assert!(out.status.success());
}

#[test]
fn check_fails_on_stale_destination() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("wiki")).unwrap();
    fs::write(tmp.path().join("wiki").join("a.md"), "# A\n**2024-06-01**\n").unwrap();
    fs::write(tmp.path().join("README.md"), "# Readme\n").unwrap();

    let out = run(tmp.path(), &["--check"]);
    assert!(!out.status.success());
    assert_eq!(fs::read_to_string(tmp.path().join("README.md")).unwrap(), "# Readme\n");
}

#[test]
fn print_does_not_write() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("wiki")).unwrap();

    let out = run(tmp.path(), &["--print", "--base-url", "https://example.org"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "# Shantanu's blog\n\n**Collection of the latest and greatest pages from the wiki**\n"
    );
    assert!(!tmp.path().join("README.md").exists());
}
