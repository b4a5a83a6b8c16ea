//! End-to-end tests for the `fintrack` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    fintrack(&dir).arg("init").assert().success();
    dir
}

#[test]
fn init_seeds_default_categories() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized fintrack"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("categories.json").exists());

    fintrack(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));

    fintrack(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn config_shows_paths() {
    let dir = initialized();

    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trend months:         6"));
}

#[test]
fn category_lifecycle() {
    let dir = initialized();

    fintrack(&dir)
        .args(["category", "create", "Pets", "--color", "#a855f7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created category: Pets"));

    fintrack(&dir)
        .args(["category", "create", "pets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fintrack(&dir)
        .args(["category", "edit", "Pets", "--name", "Pet Care"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["category", "list", "--type", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pet Care"))
        .stdout(predicate::str::contains("Salary").not());

    fintrack(&dir)
        .args(["category", "delete", "Pet Care"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["category", "show", "Pet Care"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found"));
}

#[test]
fn transactions_filter_and_dashboard() {
    let dir = initialized();

    for args in [
        vec!["1000", "--type", "income", "--category", "Salary", "--date", "2025-03-01"],
        vec![
            "300",
            "--category",
            "Groceries",
            "--date",
            "2025-03-05",
            "--description",
            "Farmers market",
        ],
        vec!["100", "--date", "2025-03-20", "--description", "Cash"],
    ] {
        fintrack(&dir)
            .args(["transaction", "add"])
            .args(args)
            .assert()
            .success();
    }

    fintrack(&dir)
        .args(["transaction", "list", "--search", "MARKET"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Farmers market"))
        .stdout(predicate::str::contains("Cash").not());

    fintrack(&dir)
        .args(["transaction", "list", "--type", "income", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+$1,000.00"));

    fintrack(&dir)
        .args(["report", "dashboard", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard - 2025-03"))
        .stdout(predicate::str::contains("$600.00"))
        .stdout(predicate::str::contains("60.0%"))
        .stdout(predicate::str::contains("Other"));

    fintrack(&dir)
        .args(["report", "dashboard", "--month", "2025-03", "--output", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("section,label"))
        .stdout(predicate::str::contains("summary,balance,2025-03-01,2025-03-31,,,600.00,"));
}

#[test]
fn rejects_invalid_transactions() {
    let dir = initialized();

    fintrack(&dir)
        .args(["transaction", "add", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));

    fintrack(&dir)
        .args(["transaction", "add", "10", "--category", "Salary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot assign an income category"));

    fintrack(&dir)
        .args(["transaction", "add", "10", "--date", "2025-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));

    fintrack(&dir)
        .args(["transaction", "add", "$-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));

    fintrack(&dir)
        .args(["transaction", "add", "abc5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));

    fintrack(&dir)
        .args(["transaction", "add", "90000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount too large"));

    fintrack(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found"));
}

#[test]
fn rejects_unrepresentable_months() {
    let dir = initialized();

    for args in [
        vec!["report", "dashboard", "--month", "999999-01"],
        vec!["report", "budgets", "--month", "999999-01"],
        vec!["report", "trend", "--month", "999999-01"],
        vec!["budget", "set", "Groceries", "100", "--month", "999999-01"],
    ] {
        fintrack(&dir)
            .args(args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Year out of range"));
    }
}

#[test]
fn budget_status_and_report() {
    let dir = initialized();

    fintrack(&dir)
        .args(["budget", "set", "Groceries", "500", "--month", "2025-01"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["budget", "set", "Groceries", "400", "--month", "2025-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fintrack(&dir)
        .args(["budget", "set", "Salary", "400", "--month", "2025-01"])
        .assert()
        .failure();

    fintrack(&dir)
        .args([
            "transaction",
            "add",
            "600",
            "--category",
            "Groceries",
            "--date",
            "2025-01-15",
        ])
        .assert()
        .success();

    fintrack(&dir)
        .args(["budget", "list", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$100.00"))
        .stdout(predicate::str::contains("120.0%"))
        .stdout(predicate::str::contains("Exceeded"));

    fintrack(&dir)
        .args(["budget", "edit", "Groceries", "700", "--month", "2025-01"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["report", "budgets", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$100.00"))
        .stdout(predicate::str::contains("Warning"));
}

#[test]
fn goal_lifecycle() {
    let dir = initialized();

    fintrack(&dir)
        .args(["goal", "create", "Laptop", "1000", "--deadline", "2025-12-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: active"));

    fintrack(&dir)
        .args(["goal", "contribute", "Laptop", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal reached!"));

    fintrack(&dir)
        .args(["goal", "list", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Laptop"))
        .stdout(predicate::str::contains("100.0%"));

    fintrack(&dir)
        .args(["goal", "create", "Boat", "5000"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["goal", "cancel", "Boat"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["goal", "contribute", "Boat", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cancelled"));

    fintrack(&dir)
        .args(["goal", "delete", "Boat"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Boat").not());
}

#[test]
fn trend_report() {
    let dir = initialized();

    fintrack(&dir)
        .args(["transaction", "add", "50", "--date", "2024-12-24"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["report", "trend", "--months", "3", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nov 2024"))
        .stdout(predicate::str::contains("Dec 2024"))
        .stdout(predicate::str::contains("-$50.00"));
}
