use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RESUME: &str = "Jane Doe\n\
jane.doe@example.com 555-123-4567\n\
Work Experience\n\
Acme Corp\n\
03/2018 - 06/2021\n\
Senior Engineer\n\
Education\n\
University of Lyon\n\
09/2012 - 06/2017\n\
Skills\n\
Rust, Python, SQL\n";

/// Command with an empty settings file and no inference endpoints.
fn cvsift(dir: &Path) -> Command {
    let settings = dir.join("settings.json");
    if !settings.exists() {
        fs::write(&settings, "{}").unwrap();
    }

    let mut cmd: Command = cargo_bin_cmd!("cvsift").into();
    cmd.current_dir(dir);
    cmd.env("CVSIFT_CONFIG", &settings);
    cmd.env_remove("CVSIFT_CLASSIFIER_URL");
    cmd.env_remove("CVSIFT_TAGGER_URL");
    cmd.env_remove("CVSIFT_PORT");
    cmd
}

fn resume_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, RESUME).unwrap();
    path
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    let mut cmd: Command = cargo_bin_cmd!("cvsift").into();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cvsift"));
}

// --- Segment ---

#[test]
fn segment_prints_sections() {
    let tmp = TempDir::new().unwrap();
    let resume = resume_file(tmp.path(), "resume.txt");

    cvsift(tmp.path())
        .arg("segment")
        .arg(&resume)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"experience\": \"Work Experience Acme Corp"))
        .stdout(predicate::str::contains("\"skills\": \"Skills Rust, Python, SQL\""))
        .stdout(predicate::str::contains(
            "\"headline\": \"Jane Doe jane.doe@example.com 555-123-4567\"",
        ));
}

#[test]
fn segment_rejects_unsupported_format() {
    let tmp = TempDir::new().unwrap();
    let resume = resume_file(tmp.path(), "resume.docx");

    cvsift(tmp.path())
        .arg("segment")
        .arg(&resume)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}

#[test]
fn segment_missing_file() {
    let tmp = TempDir::new().unwrap();

    cvsift(tmp.path())
        .args(["segment", "absent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read absent.txt"));
}

// --- Dates ---

#[test]
fn dates_lists_intervals() {
    let tmp = TempDir::new().unwrap();
    let resume = resume_file(tmp.path(), "resume.txt");

    cvsift(tmp.path())
        .arg("dates")
        .arg(&resume)
        .assert()
        .success()
        .stdout(predicate::str::contains("03/2018 - 06/2021\t39 months"))
        .stdout(predicate::str::contains("09/2012 - 06/2017\t57 months"));
}

#[test]
fn dates_scoped_to_segment() {
    let tmp = TempDir::new().unwrap();
    let resume = resume_file(tmp.path(), "resume.txt");

    cvsift(tmp.path())
        .args(["dates", "--segment", "education"])
        .arg(&resume)
        .assert()
        .success()
        .stdout(predicate::str::contains("09/2012 - 06/2017"))
        .stdout(predicate::str::contains("03/2018").not());
}

#[test]
fn dates_unknown_segment() {
    let tmp = TempDir::new().unwrap();
    let resume = resume_file(tmp.path(), "resume.txt");

    cvsift(tmp.path())
        .args(["dates", "--segment", "hobbies"])
        .arg(&resume)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown segment name"));
}

// --- Parse ---

#[test]
fn parse_requires_classifier_endpoint() {
    let tmp = TempDir::new().unwrap();
    let resume = resume_file(tmp.path(), "resume.txt");

    cvsift(tmp.path())
        .arg("parse")
        .arg(&resume)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No classifier endpoint configured"));
}

#[test]
fn parse_rejects_invalid_endpoint() {
    let tmp = TempDir::new().unwrap();
    let resume = resume_file(tmp.path(), "resume.txt");

    cvsift(tmp.path())
        .arg("parse")
        .arg(&resume)
        .args(["--classifier-url", "ftp://localhost/model"])
        .args(["--tagger-url", "http://localhost:9/ner"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid endpoint URL"));
}

// --- Settings ---

#[test]
fn invalid_settings_file() {
    let tmp = TempDir::new().unwrap();
    let resume = resume_file(tmp.path(), "resume.txt");
    fs::write(tmp.path().join("settings.json"), "not json").unwrap();

    cvsift(tmp.path())
        .arg("segment")
        .arg(&resume)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load settings"));
}
