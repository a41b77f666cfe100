//! Bulk generation and text output.

use std::fs;

use tempfile::TempDir;

use payslip_map::MappingStore;
use payslip_model::{Category, DisplayName, EmployeeRow, PayslipSettings, SourceColumns};
use payslip_report::{
    BulkPolicy, PAGE_BREAK, PayslipComposer, PayslipError, write_combined, write_payslip_files,
};

fn row(emp_no: f64, name: &str, basic: f64) -> EmployeeRow {
    EmployeeRow::new()
        .with("EMP NO", emp_no)
        .with("NIC No.", "")
        .with("NAME", name)
        .with("DEPARTMENT", "DYEING")
        .with("DESIGNATION", "OPERATOR")
        .with("DOB", "")
        .with("DOJ", "")
        .with("EPF NO", emp_no)
        .with("BASIC SAL", basic)
        .with("TOT EARN", basic)
        .with("TOT DED", 0.0)
        .with("EPF YEE", 0.0)
        .with("ETF YER", 0.0)
        .with("EPF YER", 0.0)
        .with("TOTAL EPF", 0.0)
        .with("NETPAY", basic)
        .with("BANK", "BOC")
        .with("BRANCH NAME", "KANDY")
        .with("A/C NO", 100.0 + emp_no)
}

fn rows() -> Vec<EmployeeRow> {
    (1..=40)
        .map(|n| row(f64::from(n), &format!("Employee {n}"), f64::from(n) * 1000.0))
        .collect()
}

fn composer() -> PayslipComposer {
    let mut store = MappingStore::in_memory();
    store
        .add_mapping(
            "FIXED",
            Category::Earnings,
            DisplayName::label("BASIC SAL"),
            SourceColumns::single("BASIC SAL"),
        )
        .unwrap();
    PayslipComposer::new(&store, PayslipSettings::for_month("MAY 2025"))
}

#[test]
fn results_keep_input_order() {
    let composer = composer();
    let rows = rows();
    let results = composer.generate_each(&rows, "FIXED").unwrap();
    assert_eq!(results.len(), rows.len());
    for (idx, result) in results.iter().enumerate() {
        let text = result.as_ref().unwrap();
        assert!(text.contains(&format!("WF{}", idx + 1)));
    }
}

#[test]
fn unsupported_sheet_fails_before_rows() {
    let err = composer().generate_each(&rows(), "Sheet1").unwrap_err();
    assert!(matches!(err, PayslipError::UnsupportedVariant { .. }));
}

#[test]
fn failed_rows_are_skipped_or_abort() {
    let mut rows = rows();
    rows[3] = EmployeeRow::new().with("EMP NO", 4.0);
    let composer = composer();

    let report = composer
        .generate_bulk(&rows, "FIXED", BulkPolicy::SkipFailed)
        .unwrap();
    assert_eq!(report.total(), 40);
    assert_eq!(report.generated.len(), 39);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 3);
    assert!(report.failures[0].error.is_row_error());
    assert_eq!(report.generated[3].index, 4);

    let err = composer
        .generate_bulk(&rows, "FIXED", BulkPolicy::AbortOnError)
        .unwrap_err();
    assert!(matches!(err, PayslipError::MissingColumn { .. }));
}

#[test]
fn files_are_written_per_employee() {
    let dir = TempDir::new().unwrap();
    let report = composer()
        .generate_bulk(&rows()[..3], "FIXED", BulkPolicy::SkipFailed)
        .unwrap();

    let out = dir.path().join("payslips");
    let paths = write_payslip_files(&out, &report.generated).unwrap();
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "Payslip_Employee_1_0001.txt",
            "Payslip_Employee_2_0002.txt",
            "Payslip_Employee_3_0003.txt",
        ]
    );
    let text = fs::read_to_string(&paths[1]).unwrap();
    assert_eq!(text, format!("{}\n", report.generated[1].text));
}

#[test]
fn combined_file_separates_pages() {
    let dir = TempDir::new().unwrap();
    let report = composer()
        .generate_bulk(&rows()[..3], "FIXED", BulkPolicy::SkipFailed)
        .unwrap();

    let path = dir.path().join("all.txt");
    write_combined(&path, &report.generated).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches(PAGE_BREAK).count(), 2);
    assert!(text.starts_with(&report.generated[0].text));
}
