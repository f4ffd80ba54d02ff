use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FLYER: &str = "Netto tilbud\n\
Gyldig 01.11.2024 - 07.11.2024\n\
\n\
Bananer 12,50 kr\n\
Kaffe 500 g 39 kr\n\
Minimælk 6,95,-\n";

fn tilbud(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tilbud").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path()).env("HOME", home.path());
    cmd
}

fn write_flyer(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn process_dry_run_prints_offers() {
    let dir = TempDir::new().unwrap();
    let flyer = write_flyer(dir.path(), "netto.txt", FLYER);
    let store = dir.path().join("store.json");

    tilbud(&dir)
        .args(["process", "--market", "Netto", "--dry-run", "--store"])
        .arg(&store)
        .arg(&flyer)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"product_name\": \"Bananer\""))
        .stdout(predicate::str::contains("\"price\": \"12.50\""))
        .stdout(predicate::str::contains("\"valid_from\": \"2024-11-01\""))
        .stdout(predicate::str::contains("\"valid_to\": \"2024-11-07\""))
        .stdout(predicate::str::contains("Minimælk"));

    assert!(!store.exists());
}

#[test]
fn process_text_format() {
    let dir = TempDir::new().unwrap();
    let flyer = write_flyer(dir.path(), "netto.txt", "Bananer 12,50 kr\n");

    tilbud(&dir)
        .args(["process", "-m", "Netto", "--dry-run", "-f", "text"])
        .arg(&flyer)
        .assert()
        .success()
        .stdout("Bananer: 12.50 kr\n");
}

#[test]
fn process_saves_and_offers_lists() {
    let dir = TempDir::new().unwrap();
    let flyer = write_flyer(dir.path(), "netto.txt", FLYER);
    let store = dir.path().join("store.json");

    tilbud(&dir)
        .args(["process", "--market", "Netto", "--store"])
        .arg(&store)
        .arg(&flyer)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 3 offers"));

    assert!(store.exists());

    tilbud(&dir)
        .args(["offers", "-f", "csv", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "market,product_name,price,unit,valid_from,valid_to\nNetto,Minimælk,6.95,",
        ))
        .stdout(predicate::str::contains("Netto,Kaffe 500 g,39,"));

    tilbud(&dir)
        .args(["offers", "--search", "BANAN", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Netto] Bananer: 12.50 kr"))
        .stdout(predicate::str::contains("Kaffe").not());
}

#[test]
fn process_empty_flyer_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let flyer = write_flyer(dir.path(), "empty.txt", "  \n");

    tilbud(&dir)
        .args(["process", "--market", "Netto"])
        .arg(&flyer)
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing to extract"));
}

#[test]
fn process_rejects_unsupported_files() {
    let dir = TempDir::new().unwrap();
    let flyer = write_flyer(dir.path(), "flyer.png", "not an image");

    tilbud(&dir)
        .args(["process", "--market", "Netto", "--dry-run"])
        .arg(&flyer)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn batch_processes_matching_files() {
    let dir = TempDir::new().unwrap();
    write_flyer(dir.path(), "uge44.txt", FLYER);
    write_flyer(dir.path(), "uge45.txt", "Rugbrød 15 kr\n");
    write_flyer(dir.path(), "notes.md", "Ost 20 kr\n");
    let store = dir.path().join("store.json");
    let pattern = dir.path().join("*.*");

    tilbud(&dir)
        .args(["batch", "--market", "Netto", "--store"])
        .arg(&store)
        .arg(pattern.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("4 offers"));

    tilbud(&dir)
        .args(["offers", "-f", "csv", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rugbrød"))
        .stdout(predicate::str::contains("Ost").not());
}

#[test]
fn markets_seed_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store.json");

    tilbud(&dir)
        .args(["markets", "seed", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 5 markets"));

    tilbud(&dir)
        .args(["markets", "seed", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 0 markets (5 total)"));

    tilbud(&dir)
        .args(["markets", "list", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rema 1000"))
        .stdout(predicate::str::contains("Føtex"));
}

#[test]
fn markets_remove_unknown_fails() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store.json");

    tilbud(&dir)
        .args(["markets", "remove", "Aldi", "--store"])
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("market not found"));
}

#[test]
fn offers_rejects_page_zero() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store.json");

    tilbud(&dir)
        .args(["offers", "--page", "0", "--store"])
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid query"));
}

#[test]
fn config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    tilbud(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    tilbud(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.unit_radius"])
        .assert()
        .success()
        .stdout("100\n");

    tilbud(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.unit_radius", "40"])
        .assert()
        .success();

    tilbud(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.unit_radius"])
        .assert()
        .success()
        .stdout("40\n");

    tilbud(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.no_such_key", "1"])
        .assert()
        .failure();
}
