use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const POLICY_TEXT: &str = "POLİÇE NO: 4500123456\nSİGORTALI ADI: MEHMET KAYA T.C. 12345678901\nPlaka No: 34 KLM 482\nNet Prim | 1.250,00 TL\n";

const LEDGER: &str = r#"{
    "sales": [
        {"id": "1", "amount": "1000", "status": "ACTIVE", "sale_date": "2024-02-10", "branch_id": "ist"},
        {"id": "2", "amount": "1200", "status": "ACTIVE", "sale_date": "2024-03-05", "branch_id": "ist"},
        {"id": "3", "amount": "9000", "status": "OFFER", "sale_date": "2024-03-06", "branch_id": "ist"}
    ],
    "targets": [
        {"month": 3, "year": 2024, "amount": "1600", "branch_id": "ist"}
    ]
}"#;

fn acente() -> Command {
    Command::cargo_bin("acente").unwrap()
}

#[test]
fn extract_prints_all_four_fields() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("policy.txt");
    fs::write(&input, POLICY_TEXT).unwrap();

    let output = acente().arg("extract").arg(&input).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["policyNumber"], "4500123456");
    assert_eq!(json["amount"].as_f64(), Some(1250.0));
    assert_eq!(json["customerName"], "MEHMET KAYA");
    assert_eq!(json["plateNumber"], "34 KLM 482");
}

#[test]
fn extract_reads_stdin_and_uses_customer_number() {
    acente()
        .args(["extract", "-"])
        .write_stdin("Müşteri No 135544329")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""policyNumber":"135544329""#))
        .stdout(predicate::str::contains(r#""amount":null"#));
}

#[test]
fn extract_without_customer_fallback() {
    acente()
        .args(["extract", "-", "--no-customer-fallback"])
        .write_stdin("Müşteri No 135544329")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""policyNumber":null"#));
}

#[test]
fn extract_missing_file_fails() {
    acente()
        .args(["extract", "/no/such/file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_summary() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), POLICY_TEXT).unwrap();
    fs::write(dir.path().join("b.txt"), "Müşteri No 135544329").unwrap();
    fs::write(dir.path().join("c.txt"), "okunamayan tarama").unwrap();
    let out_dir = dir.path().join("out");
    let pattern = format!("{}/*.txt", dir.path().display());

    acente()
        .args(["batch", &pattern, "--summary", "-o"])
        .arg(&out_dir)
        .assert()
        .success();

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success,4500123456,policy_label,1250.00"));
    assert!(summary.contains("b.txt,success,135544329,customer_number"));
    assert!(summary.contains("c.txt,empty,,,,,,"));
    assert!(out_dir.join("a.json").exists());
}

#[test]
fn forecast_from_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("ledger.json");
    fs::write(&ledger, LEDGER).unwrap();

    let output = acente()
        .args(["forecast", "--as-of", "2024-03-20", "--branch", "ist", "--ledger"])
        .arg(&ledger)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["forecastedAmount"].as_f64(), Some(1440.0));
    assert_eq!(json["confidence"], "MEDIUM");
    assert_eq!(json["growthRate"], 20);
}

#[test]
fn target_progress_from_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("ledger.json");
    fs::write(&ledger, LEDGER).unwrap();

    let output = acente()
        .args(["target", "--month", "3", "--year", "2024", "--ledger"])
        .arg(&ledger)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["target"].as_f64(), Some(1600.0));
    assert_eq!(json["achieved"].as_f64(), Some(1200.0));
    assert_eq!(json["percentage"], 75);
}

#[test]
fn target_rejects_invalid_month() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("ledger.json");
    fs::write(&ledger, LEDGER).unwrap();

    acente()
        .args(["target", "--month", "13", "--year", "2024", "--ledger"])
        .arg(&ledger)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid period"));
}

#[test]
fn config_flag_is_used_by_config_and_extract() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings").join("acente.json");

    acente()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.customer_number_fallback", "false"])
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["extraction"]["customer_number_fallback"], false);

    acente()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.customer_number_fallback"])
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));

    acente()
        .arg("--config")
        .arg(&config)
        .args(["extract", "-"])
        .write_stdin("Müşteri No 135544329")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""policyNumber":null"#));
}

#[test]
fn missing_config_file_is_an_error() {
    acente()
        .args(["--config", "/no/such/acente.json", "extract", "-"])
        .write_stdin("Poliçe No 4500123456")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/no/such/acente.json"));
}

#[test]
fn target_at_calendar_limit_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join("ledger.json");
    fs::write(&ledger, LEDGER).unwrap();

    acente()
        .args(["target", "--month", "12", "--year", "262142", "--ledger"])
        .arg(&ledger)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid period"));
}
