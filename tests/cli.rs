use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expense(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", data_dir.path());
    cmd
}

fn add(data_dir: &TempDir, name: &str, cost: &str, category: &str, date: &str) {
    expense(data_dir)
        .args(["record", "add", name, cost, "--type", category, "--date", date])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Added expense: {}", name)));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized expense tracker"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("records.json").exists());

    expense(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn add_list_and_report() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Coffee", "5", "Food", "2024-01-05");
    add(&dir, "Bus", "2.50", "Transport", "2024-01-06");

    expense(&dir)
        .args(["record", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee"))
        .stdout(predicate::str::contains("2 record(s), total $7.50"));

    expense(&dir)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-05 to 2024-01-06"))
        .stdout(predicate::str::contains("$7.50"))
        .stdout(predicate::str::contains("Coffee"));
}

#[test]
fn report_json_with_category_filter() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Coffee", "5", "Food", "2024-01-05");
    add(&dir, "Lunch", "12", "Food", "2024-01-20");
    add(&dir, "Bus", "2.50", "Transport", "2024-01-06");

    let output = expense(&dir)
        .args([
            "report", "--start", "2024-01-01", "--end", "2024-01-31", "--type", "Food",
            "--format", "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_expenses"], 1700);
    assert_eq!(report["total_records"], 2);
    assert_eq!(report["categories"].as_array().unwrap().len(), 1);
    assert_eq!(report["most_expensive"]["name"], "Lunch");
}

#[test]
fn empty_report_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["report", "--start", "2024-01-01", "--end", "2024-01-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expense records match"));
}

#[test]
fn invalid_input_is_rejected() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["record", "add", "Tea", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid cost"));

    expense(&dir)
        .args(["report", "--start", "2024-13-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid start date"));

    expense(&dir)
        .args(["record", "show", "exp-zzzzzzzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn report_from_raw_file_lists_skipped_records() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().join("dump.json");
    std::fs::write(
        &raw,
        r#"[
            {"_id": {"$oid": "65a1f0c2e4b0a1b2c3d4e5f6"}, "name": "Coffee", "cost": 5, "type": "Food", "date": "2024-01-05"},
            {"name": "Broken", "cost": "n/a", "type": "Food", "date": "2024-01-05"}
        ]"#,
    )
    .unwrap();

    expense(&dir)
        .args(["report", "--from"])
        .arg(&raw)
        .assert()
        .success()
        .stdout(predicate::str::contains("$5.00"))
        .stdout(predicate::str::contains("Broken"));
}

#[test]
fn import_export_roundtrip_and_audit() {
    let source = TempDir::new().unwrap();
    add(&source, "Book", "15.99", "Leisure", "2024-05-01");
    add(&source, "Taxi", "20", "Transport", "2024-05-02");

    let csv_path = source.path().join("records.csv");
    expense(&source)
        .args(["export", "--format", "csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 record(s)"));

    let target = TempDir::new().unwrap();
    expense(&target)
        .arg("import")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 record(s)"));

    expense(&target)
        .arg("import")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped 2 record(s) already present"));

    expense(&target)
        .args(["category", "list", "--names"])
        .assert()
        .success()
        .stdout("Leisure\nTransport\n");

    expense(&target)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("(imported)"));
}

#[test]
fn edit_and_delete_by_short_id() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Coffee", "5", "Food", "2024-01-05");

    let export = expense(&dir)
        .args(["export", "--format", "json"])
        .arg(dir.path().join("all.json"))
        .output()
        .unwrap();
    assert!(export.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("all.json")).unwrap())
            .unwrap();
    let uuid = json["records"][0]["id"].as_str().unwrap().to_string();
    let short_id = format!("exp-{}", &uuid[..8]);

    expense(&dir)
        .args(["record", "edit", &short_id, "--cost", "5.50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$5.50"));

    expense(&dir)
        .args(["audit", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UPDATE"))
        .stdout(predicate::str::contains("cost: 500 -> 550"));

    expense(&dir)
        .args(["record", "delete", &short_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense: Coffee"));

    expense(&dir)
        .args(["record", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expense records found."));
}

#[test]
fn config_changes_currency() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["config", "--currency", "€"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol:  €"));

    add(&dir, "Croissant", "2.20", "Food", "2024-02-02");

    expense(&dir)
        .args(["record", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€2.20"));

    expense(&dir)
        .args(["config", "--date-format", "%Q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn full_exports_reimport_with_exact_costs() {
    let source = TempDir::new().unwrap();
    add(&source, "Book", "15.99", "Leisure", "2024-05-01");

    for file in ["all.json", "all.yaml"] {
        let path = source.path().join(file);
        let format = if file.ends_with("json") { "json" } else { "yaml" };
        expense(&source)
            .args(["export", "--format", format])
            .arg(&path)
            .assert()
            .success();

        let target = TempDir::new().unwrap();
        expense(&target)
            .arg("import")
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Imported 1 record(s)"));

        expense(&target)
            .args(["record", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 record(s), total $15.99"));
    }
}

#[test]
fn import_skips_nameless_rows() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("rows.csv");
    std::fs::write(&csv_path, "name,cost,type,date\n,5,Food,2024-01-05\nTea,3,Food,2024-01-06\n")
        .unwrap();

    expense(&dir)
        .arg("import")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 record(s)"))
        .stdout(predicate::str::contains("name is missing"));
}
