//! End-to-end runs of the `payslip` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const HEADER: &str = "EMP NO,NIC No.,NAME,DEPARTMENT,DESIGNATION,DOB,DOJ,EPF NO,BASIC SAL,\
TOT EARN,TOT DED,EPF YEE,ETF YER,EPF YER,TOTAL EPF,NETPAY,BANK,BRANCH NAME,A/C NO";

fn write_sheet(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut text = format!("{HEADER}\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    fs::write(&path, text).unwrap();
    path
}

fn payslip(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_payslip"))
        .current_dir(dir)
        .arg("--config")
        .arg(dir.join("payslip_config.json"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const PERERA: &str = "1001,901234567V,A PERERA,DYEING,OPERATOR,1990-01-31,2015-06-01,1001,\
45000,45000,3600,3600,1350,5400,9000,41400,BOC,KANDY,123456";
const SILVA: &str = "1002,,B SILVA,FINISHING,HELPER,,,1002,30000,30000,2400,2400,900,3600,\
6000,27600,HNB,GALLE,654321";

#[test]
fn generates_one_file_per_employee() {
    let dir = TempDir::new().unwrap();
    let sheet = write_sheet(dir.path(), "FIXED May.csv", &[PERERA, SILVA]);

    let install = payslip(dir.path(), &["preset", "install", "fixed"]);
    assert!(install.status.success());
    let run = payslip(
        dir.path(),
        &["generate", sheet.to_str().unwrap(), "--month", "may 2025"],
    );
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));

    let first = fs::read_to_string(dir.path().join("payslips/Payslip_A_PERERA_0001.txt")).unwrap();
    assert!(first.contains("PAY SLIP FOR THE MONTH OF MAY 2025"));
    assert!(first.contains("45,000.00"));
    assert!(dir.path().join("payslips/Payslip_B_SILVA_0002.txt").exists());
}

#[test]
fn stdout_prints_selected_row() {
    let dir = TempDir::new().unwrap();
    let sheet = write_sheet(dir.path(), "FIXED May.csv", &[PERERA, SILVA]);

    let run = payslip(
        dir.path(),
        &["generate", sheet.to_str().unwrap(), "--row", "2", "--stdout"],
    );
    assert!(run.status.success());
    let text = stdout(&run);
    assert!(text.contains("B SILVA"));
    assert!(!text.contains("A PERERA"));
    assert!(!dir.path().join("payslips").exists());
}

#[test]
fn unsupported_sheet_fails() {
    let dir = TempDir::new().unwrap();
    let sheet = write_sheet(dir.path(), "CASUAL May.csv", &[PERERA]);

    let run = payslip(dir.path(), &["generate", sheet.to_str().unwrap()]);
    assert_eq!(run.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&run.stderr).contains("unsupported payslip variant"));
}

#[test]
fn failed_rows_set_exit_code() {
    let dir = TempDir::new().unwrap();
    let broken = SILVA.replacen("1002", "not-a-number", 1);
    let sheet = write_sheet(dir.path(), "FIXED May.csv", &[PERERA, broken.as_str()]);

    let run = payslip(dir.path(), &["generate", sheet.to_str().unwrap()]);
    assert_eq!(run.status.code(), Some(1));
    assert!(dir.path().join("payslips/Payslip_A_PERERA_0001.txt").exists());
}

#[test]
fn mapping_edits_persist() {
    let dir = TempDir::new().unwrap();

    let add = payslip(
        dir.path(),
        &["mapping", "add", "ftc", "earnings", "NORMAL OT", "NORMAL OT", "next"],
    );
    assert!(add.status.success());
    let config = fs::read_to_string(dir.path().join("payslip_config.json")).unwrap();
    assert!(config.contains("\"<next>\""));

    let remove = payslip(dir.path(), &["mapping", "remove", "FTC", "earnings", "NORMAL OT"]);
    assert!(remove.status.success());
    assert!(stdout(&remove).contains("Removed"));

    let bad = payslip(dir.path(), &["mapping", "add", "FTC", "bonus", "X", "X"]);
    assert_eq!(bad.status.code(), Some(1));
}

#[test]
fn month_set_and_clear() {
    let dir = TempDir::new().unwrap();

    let set = payslip(dir.path(), &["month", "set", "june", "2025"]);
    assert!(set.status.success());
    assert!(stdout(&set).contains("JUNE 2025 (configured)"));

    let clear = payslip(dir.path(), &["month", "clear"]);
    assert!(clear.status.success());
    assert!(stdout(&clear).contains("(current month)"));
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const RATED: &str = "1003,901234567V,C FERNANDO,DYEING,OPERATOR,1990-01-31,2015-06-01,1003,\
45678,45678,3600,3600,1350,5400,9000,42078,BOC,KANDY,123456";

fn traced_run(dir: &Path, sheet: &Path, log_data: bool) -> Output {
    let mut args = vec!["--log-level", "trace", "--log-format", "compact"];
    if log_data {
        args.push("--log-data");
    }
    args.extend(["generate", sheet.to_str().unwrap(), "--stdout"]);
    payslip(dir, &args)
}

#[test]
fn trace_logs_redact_employee_values() {
    let dir = TempDir::new().unwrap();
    let broken = SILVA.replacen("1002", "not-a-number", 1);
    let sheet = write_sheet(dir.path(), "FIXED May.csv", &[RATED, broken.as_str()]);
    assert!(payslip(dir.path(), &["preset", "install", "FIXED"]).status.success());

    let run = traced_run(dir.path(), &sheet, false);
    assert_eq!(run.status.code(), Some(1));
    assert!(stdout(&run).contains("45,678.00"));
    let logs = stderr(&run);
    assert!(logs.contains("resolved mapping"), "{logs}");
    assert!(logs.contains("[REDACTED]"));
    for value in ["45678", "C FERNANDO", "not-a-number"] {
        assert!(!logs.contains(value), "{value} leaked into logs:\n{logs}");
    }

    let run = traced_run(dir.path(), &sheet, true);
    let logs = stderr(&run);
    assert!(logs.contains("45678"));
    assert!(logs.contains("C FERNANDO"));
    assert!(logs.contains("not-a-number"));
}
