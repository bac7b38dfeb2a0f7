//! Integration tests for the `tally` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "depenses": [
        {"id": 1, "montant": "100,00", "dateTransaction": "2025-01-05", "categorie": 1},
        {"id": 2, "montant": 180, "dateTransaction": "2025-02-03", "categorie": 1},
        {"id": 3, "montant": 70, "dateTransaction": "2025-02-20T10:00:00Z", "categorie": "Food"},
        {"id": 4, "montant": "n/a", "dateTransaction": "2025-02-21", "categorie": 2},
        {"id": 5, "montant": 15, "dateTransaction": "not a date"}
    ],
    "revenus": [
        {"id": 1, "montant": 1500, "dateTransaction": "2025-02-01"}
    ],
    "categories": [
        {"id": 1, "categorie": "Food", "budgetDebutMois": 200},
        {"id": 2, "nom": "Leisure"}
    ]
}"#;

/// Temp config dir plus a snapshot file inside it
fn setup() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("snapshot.json");
    std::fs::write(&input, SNAPSHOT).unwrap();
    (temp_dir, input)
}

fn tally(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_CONFIG_DIR", temp_dir.path().join("config"))
        .env_remove("TALLY_INPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_no_command_prints_hint() {
    let (temp_dir, _) = setup();
    tally(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("tally --help"));
}

#[test]
fn test_missing_input_fails() {
    let (temp_dir, _) = setup();
    tally(&temp_dir)
        .args(["budget", "--period", "2025-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input snapshot"));
}

#[test]
fn test_buckets_month_json() {
    let (temp_dir, input) = setup();
    let json = json_output(
        tally(&temp_dir)
            .arg("--input")
            .arg(&input)
            .args(["buckets", "--mode", "month", "--year", "2025", "--json"]),
    );

    let buckets = json.as_array().unwrap();
    assert_eq!(buckets.len(), 12);
    assert_eq!(buckets[0]["periodKey"], "2025-01");
    assert_eq!(buckets[0]["totalExpense"], 100.0);
    assert_eq!(buckets[1]["totalExpense"], 250.0);
    assert_eq!(buckets[1]["totalRevenue"], 1500.0);
    assert_eq!(buckets[1]["count"], 4);
    assert_eq!(buckets[2]["count"], 0);
}

#[test]
fn test_buckets_weekday_table() {
    let (temp_dir, input) = setup();
    tally(&temp_dir)
        .env("TALLY_INPUT", &input)
        .args(["buckets", "--mode", "weekday", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday"))
        .stdout(predicate::str::contains("Sunday"));
}

#[test]
fn test_budget_over_limit() {
    let (temp_dir, input) = setup();
    let json = json_output(
        tally(&temp_dir)
            .arg("--input")
            .arg(&input)
            .args(["budget", "--period", "2025-02", "--json"]),
    );

    let budgets = json.as_array().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0]["category"], "Food");
    assert_eq!(budgets[0]["status"], "over");
}

#[test]
fn test_anomalies_flag_growth() {
    let (temp_dir, input) = setup();
    let json = json_output(
        tally(&temp_dir)
            .arg("--input")
            .arg(&input)
            .args(["anomalies", "--period", "2025-02", "--json"]),
    );

    let signals = json["signals"].as_array().unwrap();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0]["category"], "Food");
    assert_eq!(signals[0]["percentIncrease"], 150.0);

    let quiet = json_output(
        tally(&temp_dir)
            .arg("--input")
            .arg(&input)
            .args(["anomalies", "--period", "2025-02", "--threshold", "200", "--json"]),
    );
    assert!(quiet["signals"].as_array().unwrap().is_empty());
}

#[test]
fn test_forecast_average() {
    let (temp_dir, input) = setup();
    let json = json_output(tally(&temp_dir).arg("--input").arg(&input).args([
        "forecast",
        "--until",
        "2025-02",
        "--history-months",
        "2",
        "--horizon",
        "2",
        "--algorithm",
        "average",
        "--json",
    ]));

    let forecast = json["forecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 2);
    assert_eq!(forecast[0]["periodKey"], "2025-03");
    assert_eq!(forecast[0]["predictedExpense"], 175.0);
    assert_eq!(forecast[0]["algorithm"], "average");
    assert_eq!(json["series"].as_array().unwrap().len(), 4);
}

#[test]
fn test_forecast_rejects_zero_horizon() {
    let (temp_dir, input) = setup();
    tally(&temp_dir)
        .arg("--input")
        .arg(&input)
        .args(["forecast", "--horizon", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("horizon"));
}

#[test]
fn test_overview_terminal() {
    let (temp_dir, input) = setup();
    tally(&temp_dir)
        .arg("--input")
        .arg(&input)
        .args(["overview", "--period", "2025-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overview 2025-02"))
        .stdout(predicate::str::contains("Food"));
}

#[test]
fn test_config_init_and_show() {
    let (temp_dir, _) = setup();
    tally(&temp_dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default settings"));
    assert!(temp_dir.path().join("config").join("config.json").exists());

    tally(&temp_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Anomaly threshold: 50%"));
}

#[test]
fn test_invalid_settings_fail() {
    let (temp_dir, input) = setup();
    let config_dir = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        r#"{"budget": {"warning_ratio": 2.0, "over_ratio": 1.0}}"#,
    )
    .unwrap();

    tally(&temp_dir)
        .arg("--input")
        .arg(&input)
        .args(["budget", "--period", "2025-02"])
        .assert()
        .failure();
}
