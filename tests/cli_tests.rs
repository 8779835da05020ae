//! CLI integration tests

use assert_cmd::Command;
use chrono::NaiveDate;
use fintrack::config::FinTrackPaths;
use fintrack::models::{Category, Expense, Group, Income, MemberRole, Money, SharedExpense};
use fintrack::storage::Storage;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn fintrack(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", temp_dir.path())
        .env_remove("FINTRACK_USER")
        .env_remove("RUST_LOG");
    cmd
}

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, day).unwrap()
}

fn seed(temp_dir: &TempDir) {
    let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
    let storage = Storage::new(paths).unwrap();

    let food = Category::new("u", "Food");
    let transport = Category::new("u", "Transport");
    storage.categories.upsert(food.clone()).unwrap();
    storage.categories.upsert(transport.clone()).unwrap();
    storage
        .expenses
        .upsert(Expense::new("u", "Dinner", Money::from_cents(10000), d(3, 2)).with_category(food.id))
        .unwrap();
    storage
        .expenses
        .upsert(Expense::new("u", "Train", Money::from_cents(5000), d(3, 3)).with_category(transport.id))
        .unwrap();
    storage
        .incomes
        .upsert(Income::new("u", "Salary", Money::from_cents(200000), d(3, 1)))
        .unwrap();

    let group = Group::new("House", "u")
        .with_member("v", MemberRole::Member)
        .with_member("w", MemberRole::Member);
    storage.groups.upsert(group.clone()).unwrap();
    storage
        .shared_expenses
        .upsert(SharedExpense::new(group.id, "u", "Groceries", Money::from_cents(9000), d(3, 4)))
        .unwrap();

    storage.save_all().unwrap();
}

#[test]
fn test_help_output() {
    let temp_dir = TempDir::new().unwrap();
    fintrack(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_init_creates_data_files() {
    let temp_dir = TempDir::new().unwrap();
    fintrack(&temp_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(temp_dir.path().join("config.json").exists());
    assert!(temp_dir.path().join("data").join("expenses.json").exists());
    assert!(temp_dir.path().join("data").join("expense_shares.json").exists());
}

#[test]
fn test_config_shows_paths() {
    let temp_dir = TempDir::new().unwrap();
    fintrack(&temp_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("FinTrack Configuration"))
        .stdout(predicate::str::contains("Uncategorized"));
}

#[test]
fn test_text_report() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);

    fintrack(&temp_dir)
        .args(["report", "--user", "u", "--start", "2025-03-01", "--end", "2025-03-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial Report for u"))
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("66.67%"))
        .stdout(predicate::str::contains("Shared balance: $60.00"));
}

#[test]
fn test_json_report() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);

    let output = fintrack(&temp_dir)
        .args(["report", "--user", "u", "--start", "2025-03-01", "--end", "2025-03-31"])
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["totalExpenses"], 15000);
    assert_eq!(report["totalIncome"], 200000);
    assert_eq!(report["categoryExpenses"][0]["percentageOfTotal"], 66.67);
    assert_eq!(report["sharedExpenses"][0]["type"], "Group");
    assert_eq!(report["sharedExpenses"][0]["netContribution"], 6000);
    assert!(report["budgetComparison"].is_null());
}

#[test]
fn test_user_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);

    fintrack(&temp_dir)
        .env("FINTRACK_USER", "u")
        .args(["report", "--start", "2025-03-01", "--end", "2025-03-31", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# User: u"))
        .stdout(predicate::str::contains("totalExpenses: 15000"));
}

#[test]
fn test_csv_report_to_file() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);
    let out = temp_dir.path().join("report.csv");

    fintrack(&temp_dir)
        .args(["report", "--user", "u", "--start", "2025-03-01", "--end", "2025-03-31"])
        .args(["--format", "csv", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("section,label,date,amount,count,percentage"));
    assert!(csv.contains("category,Food,,100.00,1,66.67"));
}

#[test]
fn test_inverted_range_fails() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);

    fintrack(&temp_dir)
        .args(["report", "--user", "u", "--start", "2025-03-31", "--end", "2025-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn test_missing_user_fails() {
    let temp_dir = TempDir::new().unwrap();

    fintrack(&temp_dir)
        .args(["report", "--start", "2025-03-01", "--end", "2025-03-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user given"));
}
