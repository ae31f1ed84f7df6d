use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INVOICE_TEXT: &str = "\
Tax Invoice
Customer: Jane Citizen
Invoice/Order Number: 280749993
Date: 14 March 2024
Line Description Ordered Supplied Price Amount
Fruit & Vegetables
1 Bananas 1kg 2 2 $3.50 $7.00
Pantry
2 Rice Jasmine 5kg 1 1 $12.00 $12.00
Sub Total: $19.00
Substitutions
2 Rice Basmati 5kg 1 1 $13.00 $13.00
Registered Office: 1 Woolworths Way
";

/// A command with an isolated config dir and no ambient settings.
fn covered(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("covered").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("DEFAULT_USER_ID")
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_SERVICE_ROLE_KEY")
        .env_remove("SUPABASE_GROCERY_TABLE");
    cmd
}

fn write_invoice(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("280749993.txt");
    std::fs::write(&path, INVOICE_TEXT).unwrap();
    path
}

#[test]
fn process_without_user_id_fails_before_parsing() {
    let home = TempDir::new().unwrap();

    covered(&home)
        .args(["process", "missing-invoice.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DEFAULT_USER_ID not set"))
        .stderr(predicate::str::contains("not found").not());
}

#[test]
fn process_text_invoice_prints_rows_and_skips_insert() {
    let home = TempDir::new().unwrap();
    let input = write_invoice(&home);

    let output = covered(&home)
        .env("DEFAULT_USER_ID", "user-1")
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 3 line items."))
        .stderr(predicate::str::contains("skipping DB insert"))
        .get_output()
        .stdout
        .clone();

    let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["category"], "Fruit/Veg");
    assert_eq!(rows[0]["price"], 3.5);
    assert_eq!(rows[0]["quantity"], 2);
    assert_eq!(rows[0]["invoice_id"], 280749993);
    assert_eq!(rows[0]["last_purchased"], "14 March 2024");
    assert_eq!(rows[0]["user_id"], "user-1");
    assert_eq!(rows[2]["item_name"], "Rice Basmati 5kg");
    assert_eq!(rows[2]["category"], "Substitutions");
}

#[test]
fn process_user_id_from_config_file() {
    let home = TempDir::new().unwrap();
    let input = write_invoice(&home);
    let config = home.path().join("covered.json");
    std::fs::write(&config, r#"{ "mapping": { "default_user_id": "from-file" } }"#).unwrap();

    covered(&home)
        .arg("--config")
        .arg(&config)
        .args(["process", "--dry-run", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("from-file,Bananas 1kg,Fruit/Veg"));
}

#[test]
fn process_blank_document_yields_no_rows() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("blank.txt");
    std::fs::write(&input, "   \n\n").unwrap();

    let output = covered(&home)
        .env("DEFAULT_USER_ID", "user-1")
        .args(["process", "--dry-run"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 0 line items."))
        .stderr(predicate::str::contains("items header"))
        .get_output()
        .stdout
        .clone();

    let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(rows, serde_json::json!([]));
}

#[test]
fn process_reads_settings_from_dotenv() {
    let home = TempDir::new().unwrap();
    let input = write_invoice(&home);
    std::fs::write(home.path().join(".env"), "DEFAULT_USER_ID=from-dotenv\n").unwrap();

    covered(&home)
        .current_dir(home.path())
        .args(["process", "--dry-run", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("from-dotenv,Bananas 1kg,Fruit/Veg"));
}

#[test]
fn process_missing_input_file_fails() {
    let home = TempDir::new().unwrap();

    covered(&home)
        .env("DEFAULT_USER_ID", "user-1")
        .args(["process", "no-such-invoice.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let home = TempDir::new().unwrap();
    write_invoice(&home);
    let out_dir = home.path().join("out");
    let pattern = home.path().join("*.txt");

    covered(&home)
        .env("DEFAULT_USER_ID", "user-1")
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out_dir)
        .args(["--summary", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("1 successful"));

    let rows = std::fs::read_to_string(out_dir.join("280749993.json")).unwrap();
    assert!(rows.contains("Bananas 1kg"));

    let summary = std::fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("280749993.txt,success,280749993,14 March 2024,3,0"));
}

#[test]
fn config_path_mentions_init() {
    let home = TempDir::new().unwrap();

    covered(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("covered config init"));
}
