use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("money_tracker_cli").unwrap();
    cmd.env("MONEY_TRACKER_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn add_then_summary_and_breakdown() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["add", "income", "1000", "other", "Salary"])
        .assert()
        .success()
        .stdout(contains("Added income `Salary`"));
    cli(&home)
        .args(["add", "expense", "50", "food", "Weekly", "groceries"])
        .assert()
        .success();
    cli(&home)
        .args(["add", "expense", "30", "transport", "Metro card"])
        .assert()
        .success();

    cli(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Income:   $1000.00"))
        .stdout(contains("Expenses: $80.00"))
        .stdout(contains("Balance:  $920.00"));

    cli(&home)
        .arg("breakdown")
        .assert()
        .success()
        .stdout(contains("62.5% of total"))
        .stdout(contains("37.5% of total"));

    cli(&home)
        .args(["list", "expense"])
        .assert()
        .success()
        .stdout(contains("Weekly groceries"))
        .stdout(contains("Metro card"))
        .stdout(contains("Salary").not());
}

#[test]
fn rejects_non_positive_amount() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["add", "expense", "0", "food", "Nothing"])
        .assert()
        .failure()
        .stderr(contains("amount must be a positive number"));
    cli(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No transactions yet"));
}

#[test]
fn remove_unknown_id_is_reported_but_succeeds() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["remove", "12345"])
        .assert()
        .success()
        .stderr(contains("No transaction with id 12345"));
}

#[test]
fn unknown_command_suggests_alternative() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("sumary")
        .assert()
        .failure()
        .stderr(contains("did you mean `summary`"));
}

#[test]
fn data_lands_under_configured_key() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["add", "expense", "9.99", "health", "Vitamins"])
        .assert()
        .success();
    let stored = home
        .path()
        .join("store")
        .join("money_tracker_expenses.json");
    let json = std::fs::read_to_string(stored).unwrap();
    assert!(json.contains("\"Vitamins\""));
    assert!(json.contains("\"health\""));
}

#[test]
fn version_prints_build_summary() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains("money_tracker"));
}

#[test]
fn backups_lists_snapshots_after_second_write() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("backups")
        .assert()
        .success()
        .stdout(contains("No backups yet"));
    cli(&home)
        .args(["add", "expense", "4", "food", "Tea"])
        .assert()
        .success();
    cli(&home)
        .args(["add", "expense", "6", "food", "Cake"])
        .assert()
        .success();
    cli(&home)
        .arg("backups")
        .assert()
        .success()
        .stdout(contains("money_tracker_expenses_"));
}
