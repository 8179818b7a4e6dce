use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CARD: &str = "Government of India\nRAMASAMY KUMAR\nDOB: 12-05-1990\nMale\n\
    1234 5678 9012\nAddress: 12 Main Street\nDistrict: Chennai\nState: Tamil Nadu\n600001";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("records.db")
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Command isolated from the user's own config file.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("aadhaar").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.path().join("config"));
        cmd.current_dir(self.path());
        cmd
    }
}

#[test]
fn process_prints_extracted_fields() {
    let ws = Workspace::new();
    let card = ws.file("card.txt", CARD);

    ws.cmd()
        .arg("process")
        .arg(&card)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""identifier": "1234 5678 9012""#))
        .stdout(predicate::str::contains(r#""name": "RAMASAMY KUMAR""#));

    assert!(!ws.db().exists());
}

#[test]
fn process_text_format_and_validation() {
    let ws = Workspace::new();
    let card = ws.file("card.txt", "RAMASAMY KUMAR\nDOB: 12-05-1990");

    ws.cmd()
        .args(["process", "--format", "text", "--validate"])
        .arg(&card)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:         RAMASAMY KUMAR"))
        .stderr(predicate::str::contains("Validation issues"));
}

#[test]
fn submit_creates_then_updates() {
    let ws = Workspace::new();
    let card = ws.file("card.txt", CARD);

    ws.cmd()
        .arg("submit")
        .arg(&card)
        .arg("--db")
        .arg(ws.db())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""state": "created""#));

    ws.cmd()
        .arg("submit")
        .arg(&card)
        .arg("--db")
        .arg(ws.db())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""state": "updated""#));
}

#[test]
fn submit_without_identifier_is_rejected() {
    let ws = Workspace::new();
    let card = ws.file("card.txt", "RAMASAMY KUMAR\nDOB: 12-05-1990");

    ws.cmd()
        .arg("submit")
        .arg(&card)
        .arg("--db")
        .arg(ws.db())
        .assert()
        .failure()
        .stderr(predicate::str::contains("identifier"));
}

#[test]
fn records_get_list_delete() {
    let ws = Workspace::new();
    let card = ws.file("card.txt", CARD);

    ws.cmd()
        .arg("submit")
        .arg(&card)
        .arg("--db")
        .arg(ws.db())
        .assert()
        .success();

    ws.cmd()
        .args(["records", "get", "123456789012", "--db"])
        .arg(ws.db())
        .assert()
        .success()
        .stdout(predicate::str::contains("RAMASAMY KUMAR"));

    ws.cmd()
        .args(["records", "list", "--db"])
        .arg(ws.db())
        .assert()
        .success()
        .stdout(predicate::str::contains("1234 5678 9012"));

    ws.cmd()
        .args(["records", "delete", "1234-5678-9012", "--db"])
        .arg(ws.db())
        .assert()
        .success();

    ws.cmd()
        .args(["records", "get", "1234 5678 9012", "--db"])
        .arg(ws.db())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No record"));
}

#[test]
fn records_get_rejects_malformed_identifier() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["records", "get", "12345", "--db"])
        .arg(ws.db())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid Aadhaar number"));
}

#[test]
fn unsupported_extension_fails() {
    let ws = Workspace::new();
    let card = ws.file("card.docx", CARD);

    ws.cmd()
        .arg("process")
        .arg(&card)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported"));
}

#[test]
fn batch_writes_summary() {
    let ws = Workspace::new();
    ws.file("a.txt", CARD);
    ws.file("b.txt", &CARD.replace("1234 5678 9012", "2345 6789 0123"));
    let out = ws.path().join("out");

    ws.cmd()
        .arg("batch")
        .arg(ws.path().join("*.txt").to_string_lossy().as_ref())
        .arg("--submit")
        .arg("--summary")
        .arg("--output-dir")
        .arg(&out)
        .arg("--db")
        .arg(ws.db())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,created,1234 5678 9012"));
    assert!(summary.contains("b.txt,created,2345 6789 0123"));
    assert!(out.join("a.json").exists());
}

#[test]
fn config_set_then_get() {
    let ws = Workspace::new();
    let config = ws.path().join("config.json");
    let config = config.to_string_lossy();

    ws.cmd()
        .args(["--config", config.as_ref(), "config", "set", "store.default_list_limit", "5"])
        .assert()
        .success();

    ws.cmd()
        .args(["--config", config.as_ref(), "config", "get", "store.default_list_limit"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5\n"));
}
