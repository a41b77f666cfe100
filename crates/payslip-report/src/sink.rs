//! Plain-text payslip output.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::bulk::GeneratedPayslip;
use crate::error::{PayslipError, Result};

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "payslips";

/// Page separator between payslips in a combined file.
pub const PAGE_BREAK: char = '\u{000C}';

/// Reduces a name to characters safe in a file name. Spaces become `_`.
pub fn safe_file_stem(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let stem = kept.trim().replace(' ', "_");
    if stem.is_empty() {
        "employee".to_string()
    } else {
        stem
    }
}

/// `Payslip_<name>_<nnnn>.txt`, numbered by one-based row.
pub fn payslip_file_name(payslip: &GeneratedPayslip) -> String {
    format!(
        "Payslip_{}_{:04}.txt",
        safe_file_stem(&payslip.employee),
        payslip.index + 1
    )
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| PayslipError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| PayslipError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes one text file per payslip and returns the paths in order.
pub fn write_payslip_files(output_dir: &Path, payslips: &[GeneratedPayslip]) -> Result<Vec<PathBuf>> {
    write_payslip_files_with(output_dir, payslips, |_| {})
}

/// Like [`write_payslip_files`], calling `on_written` after each file.
pub fn write_payslip_files_with<F>(
    output_dir: &Path,
    payslips: &[GeneratedPayslip],
    mut on_written: F,
) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path),
{
    ensure_dir(output_dir)?;
    let mut outputs = Vec::with_capacity(payslips.len());
    for payslip in payslips {
        let path = output_dir.join(payslip_file_name(payslip));
        write_text(&path, &format!("{}\n", payslip.text))?;
        debug!(path = %path.display(), "wrote payslip");
        on_written(&path);
        outputs.push(path);
    }
    info!(dir = %output_dir.display(), count = outputs.len(), "payslip files written");
    Ok(outputs)
}

/// Writes all payslips into one file, separated by form feeds.
pub fn write_combined(path: &Path, payslips: &[GeneratedPayslip]) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let separator = format!("\n{}", PAGE_BREAK);
    let mut text = payslips
        .iter()
        .map(|payslip| payslip.text.as_str())
        .collect::<Vec<_>>()
        .join(&separator);
    text.push('\n');
    write_text(path, &text)?;
    info!(path = %path.display(), count = payslips.len(), "combined payslip file written");
    Ok(path.to_path_buf())
}

/// Default combined file name for a sheet.
pub fn combined_file_name(sheet_name: &str) -> String {
    format!("Payslips_{}.txt", safe_file_stem(sheet_name))
}
