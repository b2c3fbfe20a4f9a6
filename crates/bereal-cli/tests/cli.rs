use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bereal-gather"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_prints_summary() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source");
    let good = source.join("2022-11-07-15-09-47");
    fs::create_dir_all(&good).unwrap();
    fs::create_dir_all(source.join("badname")).unwrap();
    fs::write(good.join("primary.jpg"), b"primary").unwrap();
    fs::write(good.join("notes.txt"), b"notes").unwrap();
    fs::write(source.join("badname").join("primary.jpg"), b"bad").unwrap();
    let dest = dir.path().join("out");

    let output = bin().arg(&source).arg(&dest).arg("--utc").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected = format!(
        "Done. Copied: 1, Skipped folders: 1\nOutput folder: {}\n",
        fs::canonicalize(&dest).unwrap().display()
    );
    assert_eq!(stdout, expected);
    assert!(dest.join("2022-11-07-15-09-47-primary.jpg").is_file());
}

#[test]
fn test_missing_source_fails() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("nope");
    let dest = dir.path().join("out");

    let output = bin().arg(&source).arg(&dest).output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Source directory does not exist"));
    assert!(stderr.contains("nope"));
    assert!(!dest.exists());
}
