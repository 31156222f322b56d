use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LABEL: &str = "LA POSTE
REEXPEDITION TEMPORAIRE
Et Serv 1 123456789012
MME JEANNE DUPONT
12 RUE DES FLEURS
75000 PARIS
NOUVELLE ADRESSE
34 AVENUE VICTOR HUGO
69000 LYON
FRANCE
Temporaire 06/12/2024 au 05/12/2025
";

/// Command isolated from the user's config and store.
fn reexp(dir: &TempDir) -> Command {
    let config = dir.path().join("config.json");
    if !config.exists() {
        fs::write(&config, "{}").unwrap();
    }

    let mut cmd = Command::cargo_bin("reexp").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .arg("--store")
        .arg(dir.path().join("records.json"));
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

fn add_record(dir: &TempDir, name: &str, kind: &str, end: &str) {
    reexp(dir)
        .args(["store", "add", "--type", kind, "--name", name])
        .args(["--old", "12 RUE DES FLEURS, 75000 PARIS"])
        .args(["--new", "34 AVENUE VICTOR HUGO, 69000 LYON"])
        .args(["--start", "2024-01-01", "--end", end])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added record"));
}

#[test]
fn test_extract_json() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "label.txt", LABEL);

    reexp(&dir)
        .args(["extract", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"recipientName\": \"JEANNE DUPONT\""))
        .stdout(predicate::str::contains("\"type\": \"TEMPORAIRE\""))
        .stdout(predicate::str::contains("\"endDate\": \"2025-12-05\""));
}

#[test]
fn test_extract_from_stdin_as_csv() {
    let dir = TempDir::new().unwrap();

    reexp(&dir)
        .args(["extract", "-", "--format", "csv"])
        .write_stdin(LABEL)
        .assert()
        .success()
        .stdout(predicate::str::contains("type,recipient_name"))
        .stdout(predicate::str::contains("TEMPORAIRE,JEANNE DUPONT,"));
}

#[test]
fn test_extract_failure_asks_to_retry() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "noise.txt", "LA POSTE\nCOLIS POUR JEAN MARTIN\n");

    reexp(&dir)
        .args(["extract", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("try again"));
}

#[test]
fn test_extract_and_save() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "label.txt", LABEL);

    reexp(&dir)
        .args(["extract", &input, "--save"])
        .assert()
        .success();

    reexp(&dir)
        .args(["store", "search", "dupont"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 JEANNE DUPONT [TEMPORAIRE]"));
}

#[test]
fn test_store_add_list_delete() {
    let dir = TempDir::new().unwrap();
    add_record(&dir, "Jean Martin", "temporaire", "2099-12-31");
    add_record(&dir, "Paul Durand", "definitive", "2099-12-31");

    reexp(&dir)
        .args(["store", "list", "--type", "definitive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PAUL DURAND"))
        .stdout(predicate::str::contains("JEAN MARTIN").not());

    reexp(&dir)
        .args(["store", "delete", "1"])
        .assert()
        .success();

    reexp(&dir)
        .args(["store", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("record 1 not found"));
}

#[test]
fn test_store_add_rejects_reversed_dates() {
    let dir = TempDir::new().unwrap();

    reexp(&dir)
        .args(["store", "add", "--type", "temporaire", "--name", "JEAN MARTIN"])
        .args(["--old", "1 RUE A, 75000 PARIS", "--new", "2 RUE B, 69000 LYON"])
        .args(["--start", "2025-06-01", "--end", "2025-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("endDate"));
}

#[test]
fn test_store_purge() {
    let dir = TempDir::new().unwrap();
    add_record(&dir, "Jean Martin", "temporaire", "2000-01-31");
    add_record(&dir, "Paul Durand", "temporaire", "2099-12-31");

    reexp(&dir)
        .args(["store", "purge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 expired record(s)"));

    reexp(&dir)
        .args(["store", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PAUL DURAND"))
        .stdout(predicate::str::contains("JEAN MARTIN").not());
}

#[test]
fn test_lookup() {
    let dir = TempDir::new().unwrap();
    add_record(&dir, "Jean Martin", "temporaire", "2099-12-31");

    reexp(&dir)
        .args(["lookup", "-"])
        .write_stdin("COLIS POUR JEAN MARTIN SERVICE LIVRAISON")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 record(s) for JEAN MARTIN"));

    reexp(&dir)
        .args(["lookup", "-"])
        .write_stdin("COLIS POUR PAUL DURAND")
        .assert()
        .success()
        .stdout(predicate::str::contains("No forwarding order found"));
}

#[test]
fn test_candidates() {
    let dir = TempDir::new().unwrap();

    reexp(&dir)
        .args(["candidates", "-"])
        .write_stdin("Colis 3kg pour JEANNE DUPONT 12 rue des FLEURS-BLEUES")
        .assert()
        .success()
        .stdout("JEANNE DUPONT\nFLEURS-BLEUES\n");
}

#[test]
fn test_batch_with_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    fs::create_dir(&inputs).unwrap();
    write(&inputs, "good.txt", LABEL);
    write(&inputs, "bad.txt", "nothing to read here");
    let out = dir.path().join("out");

    reexp(&dir)
        .args(["batch", &format!("{}/*.txt", inputs.display())])
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    assert!(out.join("good.json").exists());
    assert!(!out.join("bad.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,type"));
    assert!(summary.contains("good.txt,success,TEMPORAIRE,JEANNE DUPONT"));
    assert!(summary.contains("bad.txt,error"));
}

#[test]
fn test_batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.txt", "nothing to read here");

    reexp(&dir)
        .args(["batch", &format!("{}/*.txt", dir.path().display())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();

    reexp(&dir)
        .args(["config", "set", "lookup.expiring_soon_days", "14"])
        .assert()
        .success();

    reexp(&dir)
        .args(["config", "get", "lookup.expiring_soon_days"])
        .assert()
        .success()
        .stdout("14\n");

    reexp(&dir)
        .args(["config", "get", "lookup.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
